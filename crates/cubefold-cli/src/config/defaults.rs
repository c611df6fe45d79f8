use cubefold::core::utils::geometry::Extents;
use cubefold::engine::config::{DEFAULT_CHUNK_SIZE, DEFAULT_COMPACT_TARGET, TieBreak};
use cubefold::engine::enumerator::DecodingStrategy;

pub struct DefaultsConfig {
    pub chain: String,
    pub decoding: DecodingStrategy,
    pub compact_extents: Extents,
    pub widest_tie_break: TieBreak,
    pub compact_tie_break: TieBreak,
    pub stop_on_compact: bool,
    pub chunk_size: u64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chain: "canonical".to_string(),
            decoding: DecodingStrategy::PerChainIndex,
            compact_extents: DEFAULT_COMPACT_TARGET,
            widest_tie_break: TieBreak::FirstWins,
            compact_tie_break: TieBreak::LastWins,
            stop_on_compact: false,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}
