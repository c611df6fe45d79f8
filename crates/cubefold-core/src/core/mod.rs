//! # Core Module
//!
//! Stateless building blocks of the folding search: the chain model, the
//! lattice geometry it is placed on, and file I/O for chains and placements.
//!
//! - **Chain Representation** ([`models`]) - Segments, chains, configurations and placements
//! - **Lattice Geometry** ([`utils`]) - Bend rotations, lattice snapping and bounding extents
//! - **File I/O** ([`io`]) - TOML chain descriptions and CSV placement export
//!
//! Nothing in this module keeps state between calls; the search machinery that
//! drives it lives in [`crate::engine`].

pub mod io;
pub mod models;
pub mod utils;
