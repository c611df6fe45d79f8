//! Data structures describing a folding chain and its orientation assignments.
//!
//! - [`segment`] - Segment kinds and per-link state
//! - [`chain`] - The immutable chain topology and its invariants
//! - [`configuration`] - Immutable orientation assignments produced by the enumerator
//! - [`placement`] - Lattice positions derived from a configuration
//! - [`presets`] - Named chains available without a chain file

pub mod chain;
pub mod configuration;
pub mod placement;
pub mod presets;
pub mod segment;
