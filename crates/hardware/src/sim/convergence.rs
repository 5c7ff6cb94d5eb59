//! Convergence loop for one module-count configuration.
//!
//! A configuration proceeds through three states:
//! 1. **Init:** Reseed every processor's mean and target, free every module.
//! 2. **Cycle:** Allocate, rotate the head to the first denied processor, compute
//!    the average access time, and stop once its relative change drops below
//!    epsilon or the cycle cap is reached.
//! 3. **Teardown:** Clear every access counter for the next configuration.

use std::num::NonZeroUsize;

use rand::RngCore;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::common::SimError;
use crate::config::Config;
use crate::core::allocator::{CycleAllocator, Occupancy};
use crate::core::ring::ProcessorRing;
use crate::core::units::RandomSource;

/// Outcome of one module-count configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfigResult {
    /// Number of memory modules simulated.
    pub modules: usize,
    /// Average access time when the loop stopped.
    pub avg_access_time: f64,
    /// Cycles simulated.
    pub cycles: u64,
    /// False when the cycle cap was reached first.
    pub converged: bool,
}

/// Average access time over the whole population after `cycle` cycles.
///
/// Each processor contributes `cycle / accesses`, or zero before its first
/// access. The sum is always divided by the ring size, not by the number of
/// processors that have been served, so starved processors pull the average
/// down in early cycles.
pub fn mean_access_time(ring: &ProcessorRing, cycle: u64) -> f64 {
    let total: f64 = ring
        .iter()
        .map(|p| {
            if p.accesses == 0 {
                0.0
            } else {
                cycle as f64 / p.accesses as f64
            }
        })
        .sum();
    total / ring.len() as f64
}

/// Relative-change test between consecutive averages.
///
/// A zero `current` never converges, so the first cycles of a configuration
/// cannot stop on a division by zero.
#[inline]
#[allow(clippy::float_cmp)]
pub fn has_converged(previous: f64, current: f64, epsilon: f64) -> bool {
    if current == 0.0 {
        return false;
    }
    ((previous - current) / current).abs() < epsilon
}

/// Drives cycles for one configuration until the average access time settles.
#[derive(Debug, Clone)]
pub struct ConvergenceLoop {
    allocator: CycleAllocator,
    occupancy: Occupancy,
    epsilon: f64,
    cycle_cap: u64,
}

impl ConvergenceLoop {
    /// Creates a loop using the distribution and criterion from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            allocator: CycleAllocator::new(config.general.distribution, config.normal.std_dev),
            occupancy: Occupancy::default(),
            epsilon: config.convergence.epsilon,
            cycle_cap: config.convergence.cycle_cap,
        }
    }

    /// Occupancy table as left by the last cycle run.
    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    /// Reseeds the ring for a configuration of `modules` modules.
    ///
    /// Every mean is drawn uniformly first, then every target is drawn from
    /// the active distribution around the new mean.
    pub fn init<R: RngCore>(
        &mut self,
        ring: &mut ProcessorRing,
        source: &mut RandomSource<R>,
        modules: NonZeroUsize,
    ) {
        for processor in ring.iter_mut() {
            processor.mean = source.uniform(modules);
        }
        for processor in ring.iter_mut() {
            processor.target = self.allocator.draw_target(source, processor.mean, modules);
        }
        self.occupancy.reset(modules.get());
    }

    /// Runs one configuration from init to teardown.
    ///
    /// # Errors
    ///
    /// Only fails if the allocator reports a slot outside the ring, which
    /// would indicate a corrupted ring.
    pub fn run<R: RngCore>(
        &mut self,
        ring: &mut ProcessorRing,
        source: &mut RandomSource<R>,
        modules: NonZeroUsize,
    ) -> Result<ConfigResult, SimError> {
        self.init(ring, source, modules);

        let mut previous = 0.0;
        let mut current = 0.0;
        let mut cycles = 0;
        let mut converged = false;

        for cycle in 1..=self.cycle_cap {
            cycles = cycle;
            let outcome = self.allocator.allocate(ring, &mut self.occupancy, source, modules);
            if let Some(slot) = outcome.first_denied {
                ring.rotate_head_to(slot)?;
            }

            current = mean_access_time(ring, cycle);
            trace!(
                modules = modules.get(),
                cycle,
                granted = outcome.granted,
                denied = outcome.denied,
                t_current = current,
                "cycle"
            );

            if has_converged(previous, current, self.epsilon) {
                converged = true;
                break;
            }
            previous = current;
            self.occupancy.clear();
        }

        if !converged {
            warn!(
                modules = modules.get(),
                cycles,
                avg_access_time = current,
                "simulation ended due to reaching maximum CPU cycles"
            );
        }

        ring.reset_accesses();

        let result = ConfigResult {
            modules: modules.get(),
            avg_access_time: current,
            cycles,
            converged,
        };
        debug!(?result, "configuration finished");
        Ok(result)
    }
}
