//! Sweep driver and per-configuration convergence loop.
//!
//! [`simulator::Simulator`] iterates module counts and owns the run state;
//! [`convergence::ConvergenceLoop`] settles one module count.

/// Convergence loop and per-configuration results.
pub mod convergence;

/// Sweep driver and the `simulate` entry point.
pub mod simulator;
