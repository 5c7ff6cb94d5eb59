//! Shared memory-module contention simulator library.
//!
//! This crate estimates the average memory-access time seen by a fixed set of
//! processors sharing `m` memory modules, for every `m` in a sweep:
//! 1. **Core:** Round-robin processor ring, per-cycle contention resolution, and
//!    the uniform / wrapped-normal module-selection generator.
//! 2. **Simulation:** Convergence loop per module count and the sweep driver.
//! 3. **Configuration:** JSON-deserializable settings with validated defaults.
//! 4. **Statistics:** Per-configuration results with text, CSV, and JSON output.

/// Common types and constants (identities, sweep constants, errors).
pub mod common;
/// Simulator configuration (defaults, distribution enum, hierarchical config structures).
pub mod config;
/// Simulation core (processor ring, allocator, generator).
pub mod core;
/// Convergence loop and sweep driver.
pub mod sim;
/// Sweep statistics collection and reporting.
pub mod stats;

/// Error type returned by every fallible operation.
pub use crate::common::SimError;
/// Root configuration type; use `Config::default()` or `Config::from_json_str`.
pub use crate::config::{Config, Distribution};
/// Sweep driver; construct with `Simulator::new`.
pub use crate::sim::simulator::{Simulator, simulate};
/// Sweep report returned by `Simulator::run`.
pub use crate::stats::SimStats;
