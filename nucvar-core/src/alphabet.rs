use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::AlphabetError;

/// The gap token shared by every alphabet.
pub const GAP: u8 = b'-';

/// Represents the kind of symbols a sequence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetType {
    /// IUPAC nucleotide codes (DNA and RNA), including ambiguity codes
    Nucleotide,
    /// IUPAC amino acid codes, including ambiguity codes and the stop symbol
    Aminoacid,
}

impl Display for AlphabetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlphabetType::Nucleotide => write!(f, "nucleotide"),
            AlphabetType::Aminoacid => write!(f, "aminoacid"),
        }
    }
}

impl FromStr for AlphabetType {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nucleotide" | "nuc" => Ok(AlphabetType::Nucleotide),
            "aminoacid" | "aa" | "protein" => Ok(AlphabetType::Aminoacid),
            _ => Err(AlphabetError::UnknownAlphabet(s.to_string())),
        }
    }
}

/// Builds a membership table for a set of upper-case symbols.
pub(crate) const fn symbol_table(symbols: &[u8]) -> [bool; 256] {
    let mut arr = [false; 256];
    let mut i = 0;
    while i < symbols.len() {
        arr[symbols[i] as usize] = true;
        i += 1;
    }
    arr
}

/// IUPAC nucleotide codes plus the gap. `U` is accepted so that RNA
/// sequences can share the same sequence type.
const NUCLEOTIDE_TABLE: [bool; 256] = symbol_table(b"ACGTURYSWKMBDHVN-");

/// IUPAC amino acid codes, ambiguity codes (B, Z, J, X), the rare
/// U/O residues, the stop codon `*` and the gap.
const AMINOACID_TABLE: [bool; 256] = symbol_table(b"ACDEFGHIKLMNPQRSTVWYBZJUOX*-");

/// Marker trait tying a sequence type to the symbols it may contain.
///
/// Validation is done on upper-cased bytes.
pub trait Alphabet: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const TYPE: AlphabetType;

    /// Validated single-symbol type of this alphabet.
    type Symbol: Copy
        + Eq
        + Ord
        + std::hash::Hash
        + fmt::Debug
        + Display
        + Into<u8>
        + Serialize
        + for<'de> Deserialize<'de>
        + Send
        + Sync
        + 'static;

    fn is_valid(symbol: u8) -> bool;

    fn symbol(symbol: u8) -> Result<Self::Symbol, AlphabetError>;
}

/// Nucleotide alphabet marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nuc;

/// Amino acid alphabet marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aa;

impl Alphabet for Nuc {
    const TYPE: AlphabetType = AlphabetType::Nucleotide;
    type Symbol = Nucleotide;

    #[inline]
    fn is_valid(symbol: u8) -> bool {
        NUCLEOTIDE_TABLE[symbol as usize]
    }

    fn symbol(symbol: u8) -> Result<Nucleotide, AlphabetError> {
        Nucleotide::new(symbol)
    }
}

impl Alphabet for Aa {
    const TYPE: AlphabetType = AlphabetType::Aminoacid;
    type Symbol = Aminoacid;

    #[inline]
    fn is_valid(symbol: u8) -> bool {
        AMINOACID_TABLE[symbol as usize]
    }

    fn symbol(symbol: u8) -> Result<Aminoacid, AlphabetError> {
        Aminoacid::new(symbol)
    }
}

/// Declares a single-symbol newtype whose only constructor validates
/// membership in the given alphabet.
macro_rules! symbol_newtype {
    ($(#[$meta:meta])* $name:ident, $alphabet:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u8);

        impl $name {
            pub const GAP: $name = $name(GAP);

            /// Validate a symbol, upper-casing it first.
            pub fn new(symbol: u8) -> Result<Self, AlphabetError> {
                let upper = symbol.to_ascii_uppercase();
                if <$alphabet as Alphabet>::is_valid(upper) {
                    Ok($name(upper))
                } else {
                    Err(AlphabetError::InvalidSymbol {
                        alphabet: <$alphabet as Alphabet>::TYPE,
                        symbol: symbol as char,
                        position: 0,
                    })
                }
            }

            #[inline]
            pub const fn as_byte(self) -> u8 {
                self.0
            }

            #[inline]
            pub const fn is_gap(self) -> bool {
                self.0 == GAP
            }
        }

        impl TryFrom<u8> for $name {
            type Error = AlphabetError;

            fn try_from(symbol: u8) -> Result<Self, Self::Error> {
                $name::new(symbol)
            }
        }

        impl FromStr for $name {
            type Err = AlphabetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.as_bytes() {
                    [symbol] => $name::new(*symbol),
                    _ => Err(AlphabetError::NotASingleSymbol {
                        alphabet: <$alphabet as Alphabet>::TYPE,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl From<$name> for u8 {
            fn from(symbol: $name) -> u8 {
                symbol.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0 as char)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_char(self.0 as char)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                value.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

symbol_newtype!(
    /// A single validated nucleotide (or gap) symbol, always upper case.
    Nucleotide,
    Nuc
);

symbol_newtype!(
    /// A single validated amino acid (or gap) symbol, always upper case.
    Aminoacid,
    Aa
);
