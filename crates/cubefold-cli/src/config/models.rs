use crate::utils::parser::ChainSource;
use cubefold::engine::config::SearchConfig;
use std::path::PathBuf;

/// Fully resolved settings for one `search` invocation.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub chain: ChainSource,
    pub search: SearchConfig,
    pub export_dir: Option<PathBuf>,
}
