use super::config::ConfigError;
use super::grid::Rejection;
use super::state::Candidate;
use crate::core::models::chain::ChainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid chain: {0}")]
    Chain(#[from] ChainError),

    #[error("Invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Placement left the occupancy lattice: {0}")]
    Lattice(Rejection),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No valid configuration found among {evaluated} evaluated")]
    NoValidConfiguration { evaluated: u64 },

    #[error(
        "No configuration matched the compact target ({accepted} of {evaluated} configurations accepted)"
    )]
    NoCompactSolution {
        widest: Candidate,
        evaluated: u64,
        accepted: u64,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),
}
