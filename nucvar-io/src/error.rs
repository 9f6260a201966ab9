use std::io;

use nucvar_core::AlphabetError;
use nucvar_extract::InvalidAlignment;
use thiserror::Error;

/// Error type for reading aligned FASTA.
#[derive(Error, Debug)]
pub enum ReadError {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Sequence data showed up before any `>` header.
    #[error("Line {0}: sequence data before the first '>' header")]
    MissingHeader(usize),

    /// A header line with nothing after the `>`.
    #[error("Line {0}: record header has no name")]
    EmptyName(usize),

    /// A record contains symbols outside the alphabet.
    #[error("Invalid sequence in record '{name}'")]
    InvalidSequence {
        name: String,
        #[source]
        source: AlphabetError,
    },

    /// `score=` attribute that isn't an integer.
    #[error("Record '{name}' has a non-integer score: '{value}'")]
    InvalidScore { name: String, value: String },

    /// The input has no records at all.
    #[error("No FASTA records found")]
    NoRecords,

    /// `--reference-name` didn't match any record.
    #[error("Reference record '{0}' not found")]
    ReferenceNotFound(String),

    /// A query can't be paired with the reference.
    #[error("Record '{name}' doesn't align with the reference")]
    InvalidAlignment {
        name: String,
        #[source]
        source: InvalidAlignment,
    },
}

/// Result type alias for nucvar-io reading.
pub type Result<T> = std::result::Result<T, ReadError>;
