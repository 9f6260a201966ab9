use std::fs::read_to_string;
use std::path::Path;

use nucvar_core::CanonicalPreset;
use nucvar_io::ReportFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

///
/// Defaults for `nucvar extract`, read from a TOML file. Every field is
/// optional and command-line flags take precedence.
///
/// ```toml
/// alphabet = "dna"
/// canonical = "ACGT"
/// missing = "N"
/// reference_name = "MN908947"
/// format = "tsv"
/// threads = 4
/// ```
///
#[derive(Deserialize, Serialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    pub alphabet: Option<CanonicalPreset>,
    pub canonical: Option<String>,
    pub missing: Option<String>,
    pub reference_name: Option<String>,
    pub format: Option<ReportFormat>,
    pub threads: Option<usize>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl TryFrom<&Path> for ExtractConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[rstest]
    fn test_try_from_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nucvar.toml");
        std::fs::write(
            &path,
            "alphabet = \"rna\"\nmissing = \"none\"\nformat = \"tsv\"\nthreads = 2\n",
        )
        .unwrap();

        let config = ExtractConfig::try_from(path.as_path()).unwrap();
        assert_eq!(
            config,
            ExtractConfig {
                alphabet: Some(CanonicalPreset::Rna),
                missing: Some("none".to_string()),
                format: Some(ReportFormat::Tsv),
                threads: Some(2),
                ..Default::default()
            }
        );
    }

    #[rstest]
    fn test_empty_file_is_all_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();
        assert_eq!(ExtractConfig::try_from(path.as_path()).unwrap(), ExtractConfig::default());
    }

    #[rstest]
    #[case("alphabet = \"klingon\"\n")]
    #[case("unknown_key = 1\n")]
    #[case("threads = \"many\"\n")]
    fn test_invalid_config(#[case] content: &str) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, content).unwrap();
        assert!(matches!(
            ExtractConfig::try_from(path.as_path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[rstest]
    fn test_missing_file() {
        let result = ExtractConfig::try_from(Path::new("does/not/exist.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
