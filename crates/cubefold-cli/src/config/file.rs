use crate::error::{CliError, Result};
use cubefold::engine::config::TieBreak;
use cubefold::engine::enumerator::DecodingStrategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSearchConfig {
    pub decoding: Option<DecodingStrategy>,
    pub range: Option<String>,
    pub compact_extents: Option<[i32; 3]>,
    pub widest_tie_break: Option<TieBreak>,
    pub compact_tie_break: Option<TieBreak>,
    pub stop_on_compact: Option<bool>,
    pub chunk_size: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileOutputConfig {
    pub export_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub chain: Option<String>,
    pub search: Option<FileSearchConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_every_section() {
        let file = write_config(
            r#"
            chain = "straight"

            [search]
            decoding = "per-corner"
            range = "0..4096"
            compact-extents = [2, 2, 2]
            widest-tie-break = "last-wins"
            compact-tie-break = "first-wins"
            stop-on-compact = true
            chunk-size = 4096

            [output]
            export-dir = "results"
            "#,
        );
        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.chain.as_deref(), Some("straight"));
        let search = config.search.unwrap();
        assert_eq!(search.decoding, Some(DecodingStrategy::PerCorner));
        assert_eq!(search.range.as_deref(), Some("0..4096"));
        assert_eq!(search.compact_extents, Some([2, 2, 2]));
        assert_eq!(search.widest_tie_break, Some(TieBreak::LastWins));
        assert_eq!(search.compact_tie_break, Some(TieBreak::FirstWins));
        assert_eq!(search.stop_on_compact, Some(true));
        assert_eq!(search.chunk_size, Some(4096));
        assert_eq!(
            config.output.unwrap().export_dir,
            Some(PathBuf::from("results"))
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = write_config("");
        let config = FileConfig::from_file(file.path()).unwrap();
        assert!(config.chain.is_none());
        assert!(config.search.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[search]\nturbo = true\n");
        assert!(matches!(
            FileConfig::from_file(file.path()),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let file = write_config("[search]\ndecoding = \"spiral\"\n");
        assert!(FileConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
