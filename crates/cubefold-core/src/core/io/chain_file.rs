use crate::core::models::chain::{Chain, ChainError, SegmentSpec};
use crate::core::models::segment::SegmentKind;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct ChainFile {
    #[serde(default)]
    name: Option<String>,
    segment: Vec<SegmentEntry>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields)]
struct SegmentEntry {
    kind: SegmentKind,
    #[serde(default)]
    blue: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ChainFileError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid chain in '{path}': {source}")]
    Chain { path: String, source: ChainError },
}

/// Reads a chain description of the form
///
/// ```toml
/// name = "canonical"
///
/// [[segment]]
/// kind = "endpoint"
/// blue = true
///
/// [[segment]]
/// kind = "corner"
/// ```
///
/// Segments without an explicit `blue` alternate colors starting blue.
pub fn load_chain(path: &Path) -> Result<Chain, ChainFileError> {
    let path_str = path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ChainFileError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let file: ChainFile = toml::from_str(&content).map_err(|e| ChainFileError::Toml {
        path: path_str.clone(),
        source: e,
    })?;

    debug!(
        name = file.name.as_deref().unwrap_or("<unnamed>"),
        segments = file.segment.len(),
        "Parsed chain file."
    );

    let specs: Vec<SegmentSpec> = file
        .segment
        .iter()
        .map(|entry| SegmentSpec {
            kind: entry.kind,
            blue: entry.blue,
        })
        .collect();
    Chain::from_specs(&specs).map_err(|e| ChainFileError::Chain {
        path: path_str,
        source: e,
    })
}
