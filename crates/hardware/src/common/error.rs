//! Simulation Error definitions.
//!
//! This module defines the error type returned by the simulator. It covers:
//! 1. **Invalid Configuration:** Processor counts, module bounds, tolerances, and
//!    output storage that are rejected before any cycle runs.
//! 2. **Selector Errors:** Unknown distribution names from strict parsing.
//! 3. **Ring Errors:** Head rotation to a slot that does not exist.
//! 4. **Parse Errors:** Malformed JSON configuration.
//!
//! Non-convergence is not an error: it is reported through
//! [`ConfigResult::converged`](crate::sim::convergence::ConfigResult::converged).

use thiserror::Error;

/// Errors raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The processor population must contain at least one processor.
    #[error("invalid processor count {0}: at least one processor is required")]
    InvalidProcessorCount(usize),

    /// The module-count sweep bound must be at least one.
    #[error("invalid module bound {0}: at least one memory module is required")]
    InvalidModuleBound(usize),

    /// The caller-provided output storage cannot hold one value per module count.
    #[error("output storage too small: need {needed} slots, got {got}")]
    OutputTooSmall {
        /// Slots required by the sweep.
        needed: usize,
        /// Slots provided by the caller.
        got: usize,
    },

    /// A distribution name was not recognized by strict parsing.
    #[error("unknown distribution '{0}' (expected 'uniform' or 'normal')")]
    InvalidDistribution(String),

    /// A numeric configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A ring rotation named a slot past the end of the ring.
    #[error("ring slot {slot} out of range for ring of {len} processors")]
    RingSlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of processors in the ring.
        len: usize,
    },

    /// The JSON configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
