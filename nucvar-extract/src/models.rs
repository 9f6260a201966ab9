//! Variant report models.
//!
//! Everything here is a plain value produced in one pass by
//! [`extract`](crate::extract()) and consumed read-only afterwards. Positions
//! are 0-based coordinates in the *ungapped* reference.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use nucvar_core::{Alphabet, Nuc, Nucleotide, Range, Seq};
use serde::{Deserialize, Serialize};

/// A substitution call: the query carries `query_base` where the reference
/// has a different base. The reference base is looked up by callers (see
/// [`AnalysisReport::substitutions`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mutation<S = Nucleotide> {
    pub position: usize,
    pub query_base: S,
}

/// Query symbols aligned against a run of reference gaps.
///
/// `anchor` is the reference coordinate that had not been consumed yet when
/// the run started: `0` for an insertion in front of the reference, the
/// reference length for one past its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Insertion<A: Alphabet = Nuc> {
    pub anchor: usize,
    pub bases: Seq<A>,
}

impl<A: Alphabet> Insertion<A> {
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

impl<A: Alphabet> Display for Insertion<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.anchor, self.bases)
    }
}

/// A run of reference positions with no query base, lying between the
/// first and last aligned query base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deletion {
    pub start: usize,
    pub length: usize,
}

impl Deletion {
    /// Exclusive end coordinate.
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn range(&self) -> Range {
        Range::from_span(self.start, self.length)
    }
}

impl Display for Deletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range().to_one_based_string())
    }
}

/// First and last reference positions (both inclusive) covered by an
/// aligned query base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlignmentRange {
    pub start: usize,
    pub end: usize,
}

impl AlignmentRange {
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// A run of the missing-data symbol (usually `N`) in reference coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingRange<S = Nucleotide> {
    pub symbol: S,
    pub range: Range,
}

impl<S: Display> Display for MissingRange<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.symbol, self.range.to_one_based_string())
    }
}

/// A [`Mutation`] joined with the reference base it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution<S = Nucleotide> {
    pub position: usize,
    pub ref_base: S,
    pub query_base: S,
}

impl<S: Display> Display for Substitution<S> {
    /// `A4G`: reference base, 1-based position, query base.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.ref_base, self.position + 1, self.query_base)
    }
}

///
/// Everything extracted from one aligned query.
///
/// The maps are keyed by reference coordinate (mutation position, insertion
/// anchor, deletion start) and iterate in ascending order. `alignment_range`
/// is `None` when the query has no aligned base at all.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct AnalysisReport<A: Alphabet = Nuc> {
    pub mutations: BTreeMap<usize, Mutation<A::Symbol>>,
    pub insertions: BTreeMap<usize, Insertion<A>>,
    pub deletions: BTreeMap<usize, Deletion>,
    pub missing: Vec<MissingRange<A::Symbol>>,
    pub alignment_range: Option<AlignmentRange>,
    pub alignment_score: i32,
    pub aligned_query: String,
}

impl<A: Alphabet> AnalysisReport<A> {
    ///
    /// Join every mutation with its reference base.
    ///
    /// `reference` must be the ungapped reference the report was extracted
    /// against. Mutations whose position falls outside it are skipped.
    ///
    pub fn substitutions(&self, reference: &Seq<A>) -> Vec<Substitution<A::Symbol>> {
        let reference = reference.as_bytes();
        self.mutations
            .values()
            .filter_map(|m| {
                let ref_base = A::symbol(*reference.get(m.position)?).ok()?;
                Some(Substitution {
                    position: m.position,
                    ref_base,
                    query_base: m.query_base,
                })
            })
            .collect()
    }

    pub fn total_substitutions(&self) -> usize {
        self.mutations.len()
    }

    /// Number of deleted reference bases.
    pub fn total_deletions(&self) -> usize {
        self.deletions.values().map(|d| d.length).sum()
    }

    /// Number of inserted query bases.
    pub fn total_insertions(&self) -> usize {
        self.insertions.values().map(|i| i.len()).sum()
    }

    pub fn total_missing(&self) -> usize {
        self.missing.iter().map(|m| m.range.len()).sum()
    }

    pub fn is_aligned(&self) -> bool {
        self.alignment_range.is_some()
    }
}
