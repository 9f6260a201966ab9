//! Second pass: substitutions, deletions and the alignment range, computed
//! over the stripped query.

use std::collections::BTreeMap;

use nucvar_core::{Alphabet, CanonicalSet, GAP};

use crate::models::{AlignmentRange, Deletion, Mutation};

/// A run of consecutive gaps not yet known to be a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GapRun {
    start: usize,
    length: usize,
}

/// Where the scan stands relative to the aligned part of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No aligned base seen yet; gaps here are leading missing data.
    BeforeAlignment,
    /// At least one aligned base seen; gaps accumulate in `pending` until the
    /// next aligned base proves they are a deletion.
    InAlignment { pending: Option<GapRun> },
}

impl ScanState {
    /// Transition on an aligned base. Returns the gap run it closes, if any.
    fn on_base(self) -> (ScanState, Option<GapRun>) {
        match self {
            ScanState::BeforeAlignment => (ScanState::InAlignment { pending: None }, None),
            ScanState::InAlignment { pending } => (ScanState::InAlignment { pending: None }, pending),
        }
    }

    /// Transition on a gap at `pos`.
    fn on_gap(self, pos: usize) -> ScanState {
        match self {
            ScanState::BeforeAlignment => ScanState::BeforeAlignment,
            ScanState::InAlignment { pending: None } => ScanState::InAlignment {
                pending: Some(GapRun { start: pos, length: 1 }),
            },
            ScanState::InAlignment { pending: Some(run) } => ScanState::InAlignment {
                pending: Some(GapRun {
                    length: run.length + 1,
                    ..run
                }),
            },
        }
    }
}

/// Output of the substitution/deletion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutput<S> {
    pub mutations: BTreeMap<usize, Mutation<S>>,
    pub deletions: BTreeMap<usize, Deletion>,
    pub alignment_range: Option<AlignmentRange>,
}

///
/// Compare the stripped query with the ungapped reference position by
/// position.
///
/// - An aligned base that differs from the reference and is in `canonical`
///   is a [`Mutation`]. A position the reference doesn't have counts as
///   differing.
/// - A gap run is a [`Deletion`] only when aligned bases surround it on both
///   sides. Leading gaps are never counted, and a run still open when the
///   scan ends is dropped: it is uncovered sequence, not a deletion.
/// - The alignment range spans the first to the last aligned base.
///
pub fn scan_stripped<A: Alphabet>(
    stripped_query: &[u8],
    ungapped_ref: &[u8],
    canonical: &CanonicalSet,
) -> ScanOutput<A::Symbol> {
    let mut mutations = BTreeMap::new();
    let mut deletions = BTreeMap::new();
    let mut alignment_range: Option<AlignmentRange> = None;
    let mut state = ScanState::BeforeAlignment;

    for (pos, &base) in stripped_query.iter().enumerate() {
        if base == GAP {
            state = state.on_gap(pos);
            continue;
        }

        let (next, closed) = state.on_base();
        state = next;
        if let Some(run) = closed {
            deletions.insert(
                run.start,
                Deletion {
                    start: run.start,
                    length: run.length,
                },
            );
        }

        alignment_range = Some(match alignment_range {
            None => AlignmentRange { start: pos, end: pos },
            Some(range) => AlignmentRange { end: pos, ..range },
        });

        if ungapped_ref.get(pos) != Some(&base) && canonical.contains(base) {
            if let Ok(query_base) = A::symbol(base) {
                mutations.insert(pos, Mutation { position: pos, query_base });
            }
        }
    }

    ScanOutput {
        mutations,
        deletions,
        alignment_range,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nucvar_core::{Nuc, Nucleotide};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scan(query: &str, reference: &str) -> ScanOutput<Nucleotide> {
        scan_stripped::<Nuc>(query.as_bytes(), reference.as_bytes(), &CanonicalSet::dna())
    }

    fn deletions(output: &ScanOutput<Nucleotide>) -> Vec<(usize, usize)> {
        output.deletions.values().map(|d| (d.start, d.length)).collect()
    }

    #[rstest]
    fn test_state_machine_transitions() {
        let state = ScanState::BeforeAlignment.on_gap(0);
        assert_eq!(state, ScanState::BeforeAlignment);

        let (state, closed) = state.on_base();
        assert_eq!(closed, None);

        let state = state.on_gap(4).on_gap(5);
        assert_eq!(
            state,
            ScanState::InAlignment { pending: Some(GapRun { start: 4, length: 2 }) }
        );

        let (state, closed) = state.on_base();
        assert_eq!(closed, Some(GapRun { start: 4, length: 2 }));
        assert_eq!(state, ScanState::InAlignment { pending: None });
    }

    #[rstest]
    fn test_substitution_call() {
        let output = scan("ACGA", "ACGT");
        let calls: Vec<(usize, u8)> = output
            .mutations
            .values()
            .map(|m| (m.position, m.query_base.as_byte()))
            .collect();
        assert_eq!(calls, vec![(3, b'A')]);
        assert_eq!(output.alignment_range, Some(AlignmentRange { start: 0, end: 3 }));
    }

    #[rstest]
    #[case("ACGN")]
    #[case("ACGR")]
    #[case("ACGY")]
    fn test_ambiguous_bases_are_not_called(#[case] query: &str) {
        let output = scan(query, "ACGT");
        assert!(output.mutations.is_empty());
        assert_eq!(output.alignment_range, Some(AlignmentRange { start: 0, end: 3 }));
    }

    #[rstest]
    fn test_internal_deletion() {
        let output = scan("A--T", "ACGT");
        assert_eq!(deletions(&output), vec![(1, 2)]);
        assert!(output.mutations.is_empty());
    }

    #[rstest]
    fn test_leading_gaps_are_not_deletions() {
        let output = scan("--GT", "ACGT");
        assert!(output.deletions.is_empty());
        assert_eq!(output.alignment_range, Some(AlignmentRange { start: 2, end: 3 }));
    }

    #[rstest]
    fn test_trailing_gaps_are_not_deletions() {
        let output = scan("AC--", "ACGT");
        assert!(output.deletions.is_empty());
        assert_eq!(output.alignment_range, Some(AlignmentRange { start: 0, end: 1 }));
    }

    #[rstest]
    fn test_several_deletions() {
        let output = scan("-A-CG--T-", "AACCGGTTA");
        assert_eq!(deletions(&output), vec![(2, 1), (5, 2)]);
        assert_eq!(output.alignment_range, Some(AlignmentRange { start: 1, end: 7 }));
    }

    #[rstest]
    fn test_all_gaps_has_no_range() {
        let output = scan("----", "ACGT");
        assert_eq!(output.alignment_range, None);
        assert!(output.deletions.is_empty());
        assert!(output.mutations.is_empty());
    }

    #[rstest]
    fn test_short_reference_counts_as_differing() {
        let output = scan("ACGT", "AC");
        let positions: Vec<usize> = output.mutations.keys().copied().collect();
        assert_eq!(positions, vec![2, 3]);
    }

    #[rstest]
    fn test_custom_canonical_set() {
        let canonical = CanonicalSet::from_symbols("ACGTN").unwrap();
        let output = scan_stripped::<Nuc>(b"ACGN", b"ACGT", &canonical);
        assert_eq!(output.mutations.keys().copied().collect::<Vec<_>>(), vec![3]);
    }
}
