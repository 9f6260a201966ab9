use thiserror::Error;

use crate::alphabet::AlphabetType;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Invalid {alphabet} symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        alphabet: AlphabetType,
        symbol: char,
        position: usize,
    },

    #[error("Expected exactly one {alphabet} symbol, got {value:?}")]
    NotASingleSymbol { alphabet: AlphabetType, value: String },

    #[error("The gap symbol can't be part of a canonical base set")]
    GapInCanonicalSet,

    #[error("Canonical base set is empty")]
    EmptyCanonicalSet,

    #[error("Unknown canonical preset: {0}. Valid options are 'dna', 'rna' or 'aminoacid'")]
    UnknownPreset(String),

    #[error("Unknown alphabet type: {0}")]
    UnknownAlphabet(String),
}
