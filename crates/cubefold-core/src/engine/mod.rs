//! # Engine Module
//!
//! The machinery behind the folding search: turning step numbers into
//! orientations, orientations into lattice placements, and placements into
//! accepted or rejected candidates.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Search parameters, tie-break policies and their builder
//! - **Enumeration** ([`enumerator`]) - Decoding strategies and the step iterator
//! - **Placement** ([`placement`]) - Lattice geometry of a posed chain
//! - **Validation** ([`grid`]) - Occupancy lattice and self-intersection checks
//! - **State Tracking** ([`state`]) - Retained extremal candidates and counters
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine and search failure types

pub mod config;
pub mod enumerator;
pub mod error;
pub mod grid;
pub mod placement;
pub mod progress;
pub mod state;
