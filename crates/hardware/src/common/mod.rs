//! Common types and constants used throughout the simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Constants:** Sweep bound, cycle cap, tolerance, and generator range.
//! 2. **Error Handling:** The [`SimError`] type returned by fallible operations.
//! 3. **Identities:** The [`ProcessorId`] newtype naming ring members.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration and simulation.
pub mod error;

use std::fmt;

pub use constants::{CONVERGENCE_EPSILON, MAX_CPU_CYCLES, NUM_MEMORY_MODULES};
pub use error::SimError;

/// Stable identity of a processor, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessorId(pub usize);

impl fmt::Display for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}
