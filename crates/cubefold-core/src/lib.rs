//! # cubefold
//!
//! Exhaustive folding search for snake cube puzzles: a chain of unit cubes
//! joined by corner links that each bend one of four ways.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Immutable chain topology, configurations and
//!   placements, lattice geometry, and file formats for chains and placements.
//!
//! - **[`engine`]: The Logic Core.** Step decoding, the chain placer, the
//!   occupancy grid that rejects self-intersecting folds, and the tracker that
//!   retains extremal candidates.
//!
//! - **[`workflows`]: The Public API.** Complete procedures such as the extremal
//!   search and single-configuration inspection.

pub mod core;
pub mod engine;
pub mod workflows;
