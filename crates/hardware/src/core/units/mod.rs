//! Functional units used by the cycle allocator.
//!
//! Currently this holds the module-selection generator shared by every
//! processor in a run.

/// Uniform and wrapped-normal module selection.
pub mod random;

pub use random::RandomSource;
