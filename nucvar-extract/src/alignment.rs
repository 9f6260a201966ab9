use nucvar_core::{Alphabet, GAP, Nuc, Seq};
use thiserror::Error;

use crate::extract::{ExtractParams, extract};
use crate::models::AnalysisReport;

/// Aligner output that can't be turned into a meaningful report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAlignment {
    #[error("Alignment is empty")]
    Empty,

    #[error(
        "Aligned query and reference differ in length: query has {query} columns, reference has {reference}"
    )]
    LengthMismatch { query: usize, reference: usize },

    #[error(
        "Ungapped reference doesn't match the aligned reference with gaps removed (first difference at position {position})"
    )]
    ReferenceMismatch { position: usize },
}

///
/// An aligned query/reference pair as produced by an aligner.
///
/// Construction checks the shape of the alignment (non-empty, equal
/// lengths), so every `Alignment` satisfies the preconditions of
/// [`extract`].
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<A: Alphabet = Nuc> {
    query: Seq<A>,
    reference: Seq<A>,
    score: i32,
}

impl<A: Alphabet> Alignment<A> {
    pub fn new(query: Seq<A>, reference: Seq<A>, score: i32) -> Result<Self, InvalidAlignment> {
        if query.len() != reference.len() {
            return Err(InvalidAlignment::LengthMismatch {
                query: query.len(),
                reference: reference.len(),
            });
        }
        if query.is_empty() {
            return Err(InvalidAlignment::Empty);
        }
        Ok(Alignment {
            query,
            reference,
            score,
        })
    }

    pub fn query(&self) -> &Seq<A> {
        &self.query
    }

    pub fn reference(&self) -> &Seq<A> {
        &self.reference
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn ungapped_reference(&self) -> Seq<A> {
        self.reference.ungapped()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    ///
    /// Drop the columns where both the query and the reference have a gap.
    ///
    /// A pair cut out of a multiple alignment keeps the columns other
    /// sequences opened; without this they would turn into insertions made
    /// of gaps. Fails with [`InvalidAlignment::Empty`] when no column is
    /// left.
    ///
    pub fn without_shared_gaps(self) -> Result<Self, InvalidAlignment> {
        let query = self.query.as_bytes();
        let reference = self.reference.as_bytes();
        let shared_gap = |col: usize| query[col] == GAP && reference[col] == GAP;

        let query_kept = self.query.filter_positions(|col| !shared_gap(col));
        let reference_kept = self.reference.filter_positions(|col| !shared_gap(col));
        Alignment::new(query_kept, reference_kept, self.score)
    }

    /// Check that `ungapped` is exactly the aligned reference with its gaps
    /// removed.
    pub fn check_reference(&self, ungapped: &Seq<A>) -> Result<(), InvalidAlignment> {
        check_ungapped(&self.reference, ungapped)
    }

    /// Extract variants, deriving the ungapped reference from the alignment.
    pub fn extract(&self, params: &ExtractParams) -> AnalysisReport<A> {
        let ungapped = self.ungapped_reference();
        extract(&self.query, &self.reference, &ungapped, self.score, params)
    }

    /// Extract variants against a caller-supplied ungapped reference, after
    /// checking it agrees with the aligned one.
    pub fn extract_against(
        &self,
        ungapped: &Seq<A>,
        params: &ExtractParams,
    ) -> Result<AnalysisReport<A>, InvalidAlignment> {
        self.check_reference(ungapped)?;
        Ok(extract(&self.query, &self.reference, ungapped, self.score, params))
    }
}

///
/// Compare a gapped reference with an ungapped one, reporting the first
/// position (in ungapped coordinates) where they disagree.
///
pub fn check_ungapped<A: Alphabet>(
    aligned_ref: &Seq<A>,
    ungapped: &Seq<A>,
) -> Result<(), InvalidAlignment> {
    let mut expected = aligned_ref.as_bytes().iter().filter(|&&b| b != GAP);
    let mut actual = ungapped.as_bytes().iter();
    let mut position = 0;
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return Ok(()),
            (Some(e), Some(a)) if e == a => position += 1,
            _ => return Err(InvalidAlignment::ReferenceMismatch { position }),
        }
    }
}
