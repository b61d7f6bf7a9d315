//! Core module
//!
//! Contains the unwrap configuration and run statistics

mod config;
mod stats;

pub use config::{DEFAULT_ATTEMPT_FACTOR, DEFAULT_EDGE_TOLERANCE, IslandPolicy, UnwrapConfig};
pub use stats::UnwrapStats;
