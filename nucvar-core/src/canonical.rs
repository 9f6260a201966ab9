use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::alphabet::{GAP, symbol_table};
use crate::errors::AlphabetError;

const DNA_CANONICAL: &[u8] = b"ACGT";
const RNA_CANONICAL: &[u8] = b"ACGU";
const AMINOACID_CANONICAL: &[u8] = b"ACDEFGHIKLMNPQRSTVWY*";

/// Named canonical base sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalPreset {
    #[default]
    Dna,
    Rna,
    Aminoacid,
}

impl CanonicalPreset {
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            CanonicalPreset::Dna => DNA_CANONICAL,
            CanonicalPreset::Rna => RNA_CANONICAL,
            CanonicalPreset::Aminoacid => AMINOACID_CANONICAL,
        }
    }
}

impl Display for CanonicalPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalPreset::Dna => write!(f, "dna"),
            CanonicalPreset::Rna => write!(f, "rna"),
            CanonicalPreset::Aminoacid => write!(f, "aminoacid"),
        }
    }
}

impl FromStr for CanonicalPreset {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dna" => Ok(CanonicalPreset::Dna),
            "rna" => Ok(CanonicalPreset::Rna),
            "aminoacid" | "aa" | "protein" => Ok(CanonicalPreset::Aminoacid),
            _ => Err(AlphabetError::UnknownPreset(s.to_string())),
        }
    }
}

///
/// The set of symbols that may be reported as a substitution.
///
/// Anything outside the set (ambiguity codes, `N`, `X`...) is treated as an
/// uncertain call and never becomes a variant. Lookups go through a
/// 256-entry table, so membership tests are a single index.
///
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalSet {
    table: [bool; 256],
}

impl CanonicalSet {
    pub fn dna() -> Self {
        Self::from_preset(CanonicalPreset::Dna)
    }

    pub fn rna() -> Self {
        Self::from_preset(CanonicalPreset::Rna)
    }

    pub fn aminoacid() -> Self {
        Self::from_preset(CanonicalPreset::Aminoacid)
    }

    pub fn from_preset(preset: CanonicalPreset) -> Self {
        CanonicalSet {
            table: symbol_table(preset.symbols()),
        }
    }

    ///
    /// Build a set from an arbitrary list of symbols.
    ///
    /// Symbols are upper-cased. The gap can never be canonical, and an
    /// empty list is rejected since it would silently disable substitution
    /// calling.
    ///
    pub fn from_symbols<T: AsRef<[u8]>>(symbols: T) -> Result<Self, AlphabetError> {
        let mut table = [false; 256];
        for &symbol in symbols.as_ref() {
            if symbol.is_ascii_whitespace() || symbol == b',' {
                continue;
            }
            let upper = symbol.to_ascii_uppercase();
            if upper == GAP {
                return Err(AlphabetError::GapInCanonicalSet);
            }
            table[upper as usize] = true;
        }
        if !table.iter().any(|&b| b) {
            return Err(AlphabetError::EmptyCanonicalSet);
        }
        Ok(CanonicalSet { table })
    }

    #[inline]
    pub fn contains(&self, symbol: u8) -> bool {
        self.table[symbol as usize]
    }

    pub fn symbols(&self) -> Vec<u8> {
        (0..=u8::MAX).filter(|&b| self.contains(b)).collect()
    }
}

impl Default for CanonicalSet {
    fn default() -> Self {
        CanonicalSet::dna()
    }
}

impl Debug for CanonicalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: String = self.symbols().into_iter().map(char::from).collect();
        write!(f, "CanonicalSet({:?})", symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_dna_excludes_ambiguity_codes() {
        let set = CanonicalSet::dna();
        for b in b"ACGT" {
            assert!(set.contains(*b));
        }
        for b in b"NRYU-" {
            assert!(!set.contains(*b));
        }
    }

    #[rstest]
    fn test_rna_uses_uracil() {
        let set = CanonicalSet::rna();
        assert!(set.contains(b'U'));
        assert!(!set.contains(b'T'));
    }

    #[rstest]
    fn test_from_symbols_uppercases_and_skips_separators() {
        let set = CanonicalSet::from_symbols("a, c,g t,N").unwrap();
        assert_eq!(set.symbols(), b"ACGNT".to_vec());
    }

    #[rstest]
    #[case("AC-", AlphabetError::GapInCanonicalSet)]
    #[case(" , ", AlphabetError::EmptyCanonicalSet)]
    fn test_from_symbols_rejects(#[case] input: &str, #[case] expected: AlphabetError) {
        assert_eq!(CanonicalSet::from_symbols(input).unwrap_err(), expected);
    }

    #[rstest]
    #[case("dna", CanonicalPreset::Dna)]
    #[case("RNA", CanonicalPreset::Rna)]
    #[case("protein", CanonicalPreset::Aminoacid)]
    fn test_preset_from_str(#[case] input: &str, #[case] expected: CanonicalPreset) {
        assert_eq!(input.parse::<CanonicalPreset>().unwrap(), expected);
    }

    #[rstest]
    fn test_debug_lists_symbols() {
        assert_eq!(format!("{:?}", CanonicalSet::dna()), "CanonicalSet(\"ACGT\")");
    }
}
