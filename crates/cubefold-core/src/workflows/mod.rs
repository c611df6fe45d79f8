//! # Workflows Module
//!
//! Top-level entry points that tie the [`engine`](crate::engine) and
//! [`core`](crate::core) layers together.
//!
//! - **Search Workflow** ([`search`]) - Exhaustive extremal search over a chain's
//!   configuration space, sequential or chunked across rayon workers.
//! - **Inspect Workflow** ([`inspect`]) - Places and validates a single configuration.

pub mod inspect;
pub mod search;
