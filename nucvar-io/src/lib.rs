//! # Input/Output for nucvar.
//!
//! Reads aligned FASTA (one gapped reference plus the queries aligned to it)
//! and writes analysis reports as JSON or TSV. Gzipped input and output are
//! handled transparently based on the `.gz` extension.
//!
pub mod error;
pub mod fasta;
pub mod report;

// re-expose core functions
pub use error::*;
pub use fasta::*;
pub use report::*;
