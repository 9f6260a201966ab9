//! First pass: collect insertions and project the query onto reference
//! coordinates.

use std::collections::BTreeMap;

use nucvar_core::{Alphabet, GAP, Seq};

use crate::models::Insertion;

/// Output of the insertion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedAlignment<A: Alphabet> {
    pub insertions: BTreeMap<usize, Insertion<A>>,
    /// Query symbols at every non-gap reference column, i.e. the query in
    /// ungapped reference coordinates.
    pub stripped_query: Vec<u8>,
}

///
/// Walk the alignment columns, tracking how many reference bases have been
/// consumed so far.
///
/// Each run of reference gaps becomes one [`Insertion`] anchored at the
/// reference coordinate not yet consumed when the run opened. The run is
/// closed by the next non-gap reference column; a run that reaches the end
/// of the alignment is still reported.
///
/// Columns past the end of the shorter input are ignored.
///
pub fn strip_insertions<A: Alphabet>(
    aligned_query: &Seq<A>,
    aligned_ref: &Seq<A>,
) -> StrippedAlignment<A> {
    let query = aligned_query.as_bytes();
    let reference = aligned_ref.as_bytes();
    let columns = query.len().min(reference.len());

    let mut insertions = BTreeMap::new();
    let mut stripped_query = Vec::with_capacity(columns);
    let mut ref_pos = 0;
    // (anchor, first column) of the insertion being accumulated
    let mut open: Option<(usize, usize)> = None;

    for (col, (&q, &r)) in query.iter().zip(reference).enumerate() {
        if r == GAP {
            if open.is_none() {
                open = Some((ref_pos, col));
            }
        } else {
            if let Some((anchor, begin)) = open.take() {
                insertions.insert(
                    anchor,
                    Insertion {
                        anchor,
                        bases: aligned_query.subseq(begin..col),
                    },
                );
            }
            stripped_query.push(q);
            ref_pos += 1;
        }
    }

    // insertion at the end of the reference
    if let Some((anchor, begin)) = open {
        insertions.insert(
            anchor,
            Insertion {
                anchor,
                bases: aligned_query.subseq(begin..columns),
            },
        );
    }

    StrippedAlignment {
        insertions,
        stripped_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use nucvar_core::NucSeq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn strip(query: &str, reference: &str) -> StrippedAlignment<nucvar_core::Nuc> {
        strip_insertions(&NucSeq::new(query).unwrap(), &NucSeq::new(reference).unwrap())
    }

    fn anchors_and_bases(stripped: &StrippedAlignment<nucvar_core::Nuc>) -> Vec<(usize, String)> {
        stripped
            .insertions
            .values()
            .map(|i| (i.anchor, i.bases.to_string()))
            .collect()
    }

    #[rstest]
    fn test_no_reference_gaps() {
        let stripped = strip("ACGA", "ACGT");
        assert!(stripped.insertions.is_empty());
        assert_eq!(stripped.stripped_query, b"ACGA".to_vec());
    }

    #[rstest]
    fn test_single_insertion_anchor() {
        let stripped = strip("ACTGT", "AC-GT");
        assert_eq!(anchors_and_bases(&stripped), vec![(2, "T".to_string())]);
        assert_eq!(stripped.stripped_query, b"ACGT".to_vec());
    }

    #[rstest]
    fn test_consecutive_gap_columns_merge() {
        let stripped = strip("ATTTCG", "A---CG");
        assert_eq!(anchors_and_bases(&stripped), vec![(1, "TTT".to_string())]);
    }

    #[rstest]
    fn test_leading_and_trailing_insertions() {
        let stripped = strip("GGACGTAA", "--ACGT--");
        assert_eq!(
            anchors_and_bases(&stripped),
            vec![(0, "GG".to_string()), (4, "AA".to_string())]
        );
        assert_eq!(stripped.stripped_query, b"ACGT".to_vec());
    }

    #[rstest]
    fn test_multiple_insertions_keep_ascending_anchors() {
        let stripped = strip("ACCGTTA", "A-CG--A");
        assert_eq!(
            anchors_and_bases(&stripped),
            vec![(1, "C".to_string()), (3, "TT".to_string())]
        );
    }

    #[rstest]
    fn test_query_gaps_are_kept_in_stripped_query() {
        let stripped = strip("A--T", "ACGT");
        assert_eq!(stripped.stripped_query, b"A--T".to_vec());
    }

    #[rstest]
    fn test_length_mismatch_truncates_without_panic() {
        let stripped = strip("ACGTAAA", "AC-");
        assert_eq!(anchors_and_bases(&stripped), vec![(2, "G".to_string())]);
        assert_eq!(stripped.stripped_query, b"AC".to_vec());
    }
}
