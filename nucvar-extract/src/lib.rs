//! # Variant extraction from pairwise alignments
//!
//! Turns an aligned query/reference pair into the differences between them,
//! all in ungapped reference coordinates:
//!
//! - substitutions (only for symbols in a configurable canonical set)
//! - insertions, anchored at the reference position they precede
//! - deletions, only where aligned bases flank the gap on both sides
//! - the span of the reference actually covered by the query
//! - runs of missing data (`N` by default)
//!
//! Extraction is generic over the [`Alphabet`](nucvar_core::Alphabet), so
//! the same code handles nucleotide and aminoacid alignments.

pub mod aligner;
pub mod alignment;
pub mod batch;
pub mod extract;
pub mod insertions;
pub mod missing;
pub mod models;
pub mod scan;

pub use aligner::{Aligner, analyze};
pub use alignment::{Alignment, InvalidAlignment, check_ungapped};
pub use batch::{extract_batch, extract_batch_with};
pub use extract::{DEFAULT_MISSING_SYMBOL, ExtractParams, extract};
pub use models::{
    AlignmentRange, AnalysisReport, Deletion, Insertion, MissingRange, Mutation, Substitution,
};
