//! Reading chain descriptions and writing placements.
//!
//! Chains are described in TOML ([`chain_file`]); placements are exported as
//! CSV ([`placement_csv`]) for external viewers.

pub mod chain_file;
pub mod placement_csv;
