//! # nucvar
//!
//! Turn a finished pairwise alignment into variant calls: substitutions,
//! insertions and deletions in ungapped reference coordinates, plus the span
//! of the reference the query actually covers.
//!
//! Each part lives in its own crate and is re-exported here behind a
//! feature flag:
//!
//! - `core`: alphabets, validated sequences, canonical base sets
//! - `extract`: the extraction engine
//! - `io`: aligned FASTA input, JSON/TSV report output
//!
//! ```
//! use nucvar::core::NucSeq;
//! use nucvar::extract::{Alignment, ExtractParams};
//!
//! let alignment = Alignment::new(
//!     NucSeq::new("ACTGA").unwrap(),
//!     NucSeq::new("AC-GT").unwrap(),
//!     0,
//! )
//! .unwrap();
//! let report = alignment.extract(&ExtractParams::default());
//!
//! assert_eq!(report.insertions[&2].bases.as_str(), "T");
//! assert_eq!(report.mutations[&3].query_base.to_string(), "A");
//! ```

#[cfg(feature = "core")]
#[doc(inline)]
pub use nucvar_core as core;

#[cfg(feature = "extract")]
#[doc(inline)]
pub use nucvar_extract as extract;

#[cfg(feature = "io")]
#[doc(inline)]
pub use nucvar_io as io;
