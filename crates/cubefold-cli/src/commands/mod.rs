pub mod inspect;
pub mod search;

use crate::error::{CliError, Result};
use crate::utils::parser::ChainSource;
use cubefold::core::io::chain_file;
use cubefold::core::models::chain::Chain;
use cubefold::core::models::presets::find_preset;
use cubefold::engine::error::EngineError;
use tracing::info;

fn load_chain(source: &ChainSource) -> Result<Chain> {
    let chain = match source {
        ChainSource::Preset(name) => {
            let preset = find_preset(name)
                .ok_or_else(|| CliError::Argument(format!("Unknown chain preset '{}'", name)))?;
            info!("Building preset chain '{}': {}", name, preset.description);
            preset.build().map_err(EngineError::from)?
        }
        ChainSource::File(path) => {
            info!("Loading chain from {:?}", path);
            chain_file::load_chain(path)?
        }
    };
    Ok(chain)
}
