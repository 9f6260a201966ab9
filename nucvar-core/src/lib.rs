//! # nucvar-core
//!
//! Shared building blocks for the nucvar crates:
//!
//! - sequence alphabets and validated symbol/sequence newtypes ([`Nucleotide`], [`NucSeq`], ...)
//! - canonical base sets used to decide which symbols may be called as substitutions
//! - half-open coordinate ranges
//! - small file utilities (transparent gzip reading and writing)
pub mod alphabet;
pub mod canonical;
pub mod errors;
pub mod models;
pub mod seq;
pub mod utils;

pub use alphabet::{Aa, Alphabet, AlphabetType, Aminoacid, GAP, Nuc, Nucleotide};
pub use canonical::{CanonicalPreset, CanonicalSet};
pub use errors::AlphabetError;
pub use models::Range;
pub use seq::{AaSeq, NucSeq, Seq};
