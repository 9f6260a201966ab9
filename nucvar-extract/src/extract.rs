//! Variant extraction from a finished alignment.

use log::{debug, warn};
use nucvar_core::{Alphabet, CanonicalSet, Seq};

use crate::insertions::{StrippedAlignment, strip_insertions};
use crate::missing::find_symbol_ranges;
use crate::models::{AnalysisReport, MissingRange};
use crate::scan::{ScanOutput, scan_stripped};

/// Default missing-data symbol for nucleotide data.
pub const DEFAULT_MISSING_SYMBOL: u8 = b'N';

/// Knobs for [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractParams {
    /// Symbols eligible for a substitution call.
    pub canonical: CanonicalSet,
    /// Symbol whose runs are reported as missing data. `None` disables the
    /// search.
    pub missing_symbol: Option<u8>,
}

impl ExtractParams {
    pub fn new(canonical: CanonicalSet) -> Self {
        ExtractParams {
            canonical,
            missing_symbol: Some(DEFAULT_MISSING_SYMBOL),
        }
    }

    pub fn with_missing_symbol(mut self, symbol: Option<u8>) -> Self {
        self.missing_symbol = symbol.map(|b| b.to_ascii_uppercase());
        self
    }
}

impl Default for ExtractParams {
    fn default() -> Self {
        ExtractParams::new(CanonicalSet::dna())
    }
}

///
/// Derive substitutions, insertions, deletions and the alignment range from
/// an aligned query/reference pair.
///
/// # Arguments
/// * `aligned_query` - gapped query, one column per alignment position
/// * `aligned_ref` - gapped reference, same length as `aligned_query`
/// * `ungapped_ref` - `aligned_ref` with its gaps removed
/// * `score` - aligner score, passed through untouched
/// * `params` - canonical set and missing-data symbol
///
/// The inputs are trusted: equal lengths and a consistent `ungapped_ref`
/// are the caller's responsibility (see [`Alignment`](crate::Alignment) for
/// a checked entry point). Inconsistent inputs give a meaningless report but
/// never panic.
///
/// Trailing insertions are reported while trailing gap runs in the query
/// are not: extra query sequence past the reference is real material, a
/// query that stops early is just uncovered.
///
pub fn extract<A: Alphabet>(
    aligned_query: &Seq<A>,
    aligned_ref: &Seq<A>,
    ungapped_ref: &Seq<A>,
    score: i32,
    params: &ExtractParams,
) -> AnalysisReport<A> {
    let StrippedAlignment {
        insertions,
        stripped_query,
    } = strip_insertions(aligned_query, aligned_ref);

    let ScanOutput {
        mutations,
        deletions,
        alignment_range,
    } = scan_stripped::<A>(&stripped_query, ungapped_ref.as_bytes(), &params.canonical);

    let missing = match params.missing_symbol.map(A::symbol) {
        Some(Ok(symbol)) => find_symbol_ranges(&stripped_query, symbol.into())
            .into_iter()
            .map(|range| MissingRange { symbol, range })
            .collect(),
        Some(Err(e)) => {
            warn!("Skipping missing-data search: {}", e);
            Vec::new()
        }
        None => Vec::new(),
    };

    debug!(
        "Extracted {} substitutions, {} insertions, {} deletions, {} missing ranges",
        mutations.len(),
        insertions.len(),
        deletions.len(),
        missing.len()
    );

    AnalysisReport {
        mutations,
        insertions,
        deletions,
        missing,
        alignment_range,
        alignment_score: score,
        aligned_query: aligned_query.as_str().to_string(),
    }
}
