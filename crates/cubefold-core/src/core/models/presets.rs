use super::chain::{CANONICAL_CORNER_INDICES, CANONICAL_LENGTH, Chain, ChainError};
use phf::phf_map;

#[derive(Debug, Clone, Copy)]
pub struct ChainPreset {
    pub length: usize,
    pub corners: &'static [usize],
    pub description: &'static str,
}

impl ChainPreset {
    /// Builds the preset chain in its resting pose.
    pub fn build(&self) -> Result<Chain, ChainError> {
        Chain::with_corners(self.length, self.corners).map(Chain::with_resting_pose)
    }
}

pub static CHAIN_PRESETS: phf::Map<&'static str, ChainPreset> = phf_map! {
    "canonical" => ChainPreset {
        length: CANONICAL_LENGTH,
        corners: &CANONICAL_CORNER_INDICES,
        description: "The 27-segment snake cube with 16 corner links",
    },
    "straight" => ChainPreset {
        length: CANONICAL_LENGTH,
        corners: &[],
        description: "27 segments with no corners; folds only into a rod",
    },
};

pub fn find_preset(name: &str) -> Option<&'static ChainPreset> {
    CHAIN_PRESETS.get(name.to_lowercase().as_str())
}

pub fn preset_names() -> impl Iterator<Item = &'static str> {
    CHAIN_PRESETS.keys().copied()
}
