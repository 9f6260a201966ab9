//! Parallel extraction over many alignments.

use nucvar_core::Alphabet;
use rayon::prelude::*;

use crate::alignment::Alignment;
use crate::extract::ExtractParams;
use crate::models::AnalysisReport;

/// Extract every alignment on the rayon pool. Output order matches input order.
pub fn extract_batch<A: Alphabet>(
    alignments: &[Alignment<A>],
    params: &ExtractParams,
) -> Vec<AnalysisReport<A>> {
    extract_batch_with(alignments, params, |_| {})
}

///
/// Same as [`extract_batch`], calling `on_extracted` once per finished
/// report (from whichever worker produced it). Useful for progress bars.
///
pub fn extract_batch_with<A, F>(
    alignments: &[Alignment<A>],
    params: &ExtractParams,
    on_extracted: F,
) -> Vec<AnalysisReport<A>>
where
    A: Alphabet,
    F: Fn(&AnalysisReport<A>) + Sync + Send,
{
    alignments
        .par_iter()
        .map(|alignment| {
            let report = alignment.extract(params);
            on_extracted(&report);
            report
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use nucvar_core::NucSeq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn alignments() -> Vec<Alignment> {
        let reference = NucSeq::new("ACGTACGTAC").unwrap();
        (0..64)
            .map(|i| {
                let mut query = reference.as_bytes().to_vec();
                query[i % 10] = b'-';
                Alignment::new(NucSeq::new(query).unwrap(), reference.clone(), i as i32).unwrap()
            })
            .collect()
    }

    #[rstest]
    fn test_batch_matches_sequential_and_keeps_order() {
        let alignments = alignments();
        let params = ExtractParams::default();

        let sequential: Vec<AnalysisReport> = alignments.iter().map(|a| a.extract(&params)).collect();
        let parallel = extract_batch(&alignments, &params);

        assert_eq!(parallel, sequential);
        for (i, report) in parallel.iter().enumerate() {
            assert_eq!(report.alignment_score, i as i32);
        }
    }

    #[rstest]
    fn test_callback_runs_once_per_alignment() {
        let alignments = alignments();
        let seen = AtomicUsize::new(0);
        let reports = extract_batch_with(&alignments, &ExtractParams::default(), |_| {
            seen.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(seen.load(Ordering::Relaxed), alignments.len());
        assert_eq!(reports.len(), alignments.len());
    }
}
