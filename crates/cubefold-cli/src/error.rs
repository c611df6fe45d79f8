use cubefold::core::io::chain_file::ChainFileError;
use cubefold::core::io::placement_csv::ExportError;
use cubefold::engine::error::{EngineError, SearchError};
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    ChainFile(#[from] ChainFileError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
