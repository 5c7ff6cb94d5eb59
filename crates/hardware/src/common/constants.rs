//! Global Simulation Constants.
//!
//! This module defines the constants shared by the generator, the convergence
//! loop, and the sweep driver. It includes:
//! 1. **Sweep Constants:** The module-count bound of a full sweep.
//! 2. **Convergence Constants:** Relative tolerance and the cycle cap.
//! 3. **Generator Constants:** Raw draw range and the normal spread.

/// Upper bound of the module-count sweep (inclusive).
///
/// A full run produces one average access time per module count in `1..=512`.
pub const NUM_MEMORY_MODULES: usize = 512;

/// Maximum number of cycles simulated for one module count.
///
/// A configuration that reaches this many cycles without converging is
/// recorded with its last computed value and flagged as unconverged.
pub const MAX_CPU_CYCLES: u64 = 1_000_000;

/// Relative tolerance between consecutive cycle averages for convergence.
pub const CONVERGENCE_EPSILON: f64 = 0.02;

/// Standard deviation of the wrapped-normal module selection.
pub const STANDARD_DEVIATION: f64 = 5.0;

/// Largest value a raw generator draw can take (31-bit range).
pub const RAND_MAX: u32 = 0x7FFF_FFFF;

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u64 = 1;
