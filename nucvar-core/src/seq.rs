use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Debug, Display};
use std::marker::PhantomData;
use std::str::FromStr;

use crate::alphabet::{Aa, Alphabet, GAP, Nuc};
use crate::errors::AlphabetError;

///
/// A sequence whose every symbol belongs to the alphabet `A`.
///
/// The only way to build one is through [`Seq::new`] (or the `FromStr`/`TryFrom`
/// impls that call it), which upper-cases the input and rejects anything
/// outside the alphabet. Downstream code can therefore work on the raw
/// bytes without re-checking them.
///
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Seq<A: Alphabet> {
    seq: String,
    _alphabet: PhantomData<A>,
}

/// Nucleotide sequence, possibly gapped.
pub type NucSeq = Seq<Nuc>;

/// Amino acid sequence, possibly gapped.
pub type AaSeq = Seq<Aa>;

impl<A: Alphabet> Seq<A> {
    pub fn new<T: AsRef<[u8]>>(symbols: T) -> Result<Self, AlphabetError> {
        let symbols = symbols.as_ref();
        let mut seq = String::with_capacity(symbols.len());
        for (position, &symbol) in symbols.iter().enumerate() {
            let upper = symbol.to_ascii_uppercase();
            if !A::is_valid(upper) {
                return Err(AlphabetError::InvalidSymbol {
                    alphabet: A::TYPE,
                    symbol: symbol as char,
                    position,
                });
            }
            seq.push(upper as char);
        }
        Ok(Seq {
            seq,
            _alphabet: PhantomData,
        })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.seq.as_bytes()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.seq
    }

    pub fn into_string(self) -> String {
        self.seq
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    /// Copy of the symbols in `range`. Panics if the range is out of bounds,
    /// like slice indexing.
    pub fn subseq(&self, range: std::ops::Range<usize>) -> Self {
        Seq {
            seq: self.seq[range].to_string(),
            _alphabet: PhantomData,
        }
    }

    /// Copy of the sequence with every gap removed.
    pub fn ungapped(&self) -> Self {
        Seq {
            seq: self.seq.chars().filter(|&c| c as u8 != GAP).collect(),
            _alphabet: PhantomData,
        }
    }

    pub fn count_gaps(&self) -> usize {
        self.as_bytes().iter().filter(|&&b| b == GAP).count()
    }

    /// Copy of the sequence keeping only the positions for which `keep`
    /// returns true.
    pub fn filter_positions<F: FnMut(usize) -> bool>(&self, mut keep: F) -> Self {
        Seq {
            seq: self
                .seq
                .char_indices()
                .filter(|&(pos, _)| keep(pos))
                .map(|(_, c)| c)
                .collect(),
            _alphabet: PhantomData,
        }
    }
}

impl<A: Alphabet> FromStr for Seq<A> {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Seq::new(s)
    }
}

impl<A: Alphabet> TryFrom<&str> for Seq<A> {
    type Error = AlphabetError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Seq::new(s)
    }
}

impl<A: Alphabet> TryFrom<Vec<u8>> for Seq<A> {
    type Error = AlphabetError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Seq::new(bytes)
    }
}

impl<A: Alphabet> AsRef<[u8]> for Seq<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: Alphabet> Display for Seq<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.seq)
    }
}

impl<A: Alphabet> Debug for Seq<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", A::TYPE, self.seq)
    }
}

impl<A: Alphabet> Serialize for Seq<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.seq)
    }
}

impl<'de, A: Alphabet> Deserialize<'de> for Seq<A> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Seq::new(value).map_err(serde::de::Error::custom)
    }
}
