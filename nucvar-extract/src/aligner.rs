//! Seam for the pairwise aligner, which lives outside this crate.

use anyhow::{Context, Result};
use nucvar_core::{Alphabet, Nuc, Seq};

use crate::alignment::Alignment;
use crate::extract::ExtractParams;
use crate::models::AnalysisReport;

/// Anything that can align a query against an ungapped reference.
pub trait Aligner<A: Alphabet = Nuc> {
    fn name(&self) -> &str;

    /// Align `query` to `reference`. The aligned reference must reduce to
    /// `reference` once its gaps are removed.
    fn align(&self, query: &Seq<A>, reference: &Seq<A>) -> Result<Alignment<A>>;
}

///
/// Align `query` with `aligner` and extract its variants against
/// `reference`.
///
/// An aligned reference that doesn't reduce back to `reference` is
/// reported as an error instead of producing a shifted report.
///
pub fn analyze<A, L>(
    aligner: &L,
    query: &Seq<A>,
    reference: &Seq<A>,
    params: &ExtractParams,
) -> Result<AnalysisReport<A>>
where
    A: Alphabet,
    L: Aligner<A> + ?Sized,
{
    let alignment = aligner
        .align(query, reference)
        .with_context(|| format!("Aligner '{}' failed", aligner.name()))?;

    let report = alignment.extract_against(reference, params).with_context(|| {
        format!(
            "Aligner '{}' returned an alignment inconsistent with the reference",
            aligner.name()
        )
    })?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use anyhow::bail;
    use nucvar_core::NucSeq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// Returns a fixed alignment regardless of its input.
    struct CannedAligner {
        query: &'static str,
        reference: &'static str,
    }

    impl Aligner for CannedAligner {
        fn name(&self) -> &str {
            "canned"
        }

        fn align(&self, _query: &NucSeq, _reference: &NucSeq) -> Result<Alignment> {
            Ok(Alignment::new(
                NucSeq::new(self.query)?,
                NucSeq::new(self.reference)?,
                42,
            )?)
        }
    }

    struct FailingAligner;

    impl Aligner for FailingAligner {
        fn name(&self) -> &str {
            "failing"
        }

        fn align(&self, _query: &NucSeq, _reference: &NucSeq) -> Result<Alignment> {
            bail!("no seed hits")
        }
    }

    #[rstest]
    fn test_analyze_runs_extraction() {
        let aligner = CannedAligner { query: "ACTGT", reference: "AC-GT" };
        let reference = NucSeq::new("ACGT").unwrap();
        let query = NucSeq::new("ACTGT").unwrap();

        let report = analyze(&aligner, &query, &reference, &ExtractParams::default()).unwrap();
        assert_eq!(report.alignment_score, 42);
        assert_eq!(report.insertions[&2].bases.as_str(), "T");
    }

    #[rstest]
    fn test_analyze_rejects_inconsistent_reference() {
        let aligner = CannedAligner { query: "ACGT", reference: "ACGA" };
        let reference = NucSeq::new("ACGT").unwrap();
        let err = analyze(&aligner, &reference, &reference, &ExtractParams::default()).unwrap_err();
        assert!(format!("{:#}", err).contains("inconsistent with the reference"));
        assert!(format!("{:#}", err).contains("position 3"));
    }

    #[rstest]
    fn test_analyze_wraps_aligner_errors() {
        let reference = NucSeq::new("ACGT").unwrap();
        let err = analyze(&FailingAligner, &reference, &reference, &ExtractParams::default()).unwrap_err();
        assert_eq!(format!("{:#}", err), "Aligner 'failing' failed: no seed hits");
    }
}
