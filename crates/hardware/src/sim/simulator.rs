//! Simulator: owns the processor ring, the generator, and the convergence loop.
//!
//! The ring is built and the generator seeded once per simulator; every
//! module count of the sweep reuses both, so generator state flows from one
//! configuration into the next exactly as in a single uninterrupted run.

use std::num::NonZeroUsize;

use rand::RngCore;
use rand::rngs::StdRng;
use tracing::info;

use crate::common::SimError;
use crate::config::{Config, Distribution};
use crate::core::ring::ProcessorRing;
use crate::core::units::RandomSource;
use crate::sim::convergence::{ConfigResult, ConvergenceLoop};
use crate::stats::SimStats;

/// Top-level sweep driver.
#[derive(Debug)]
pub struct Simulator<R: RngCore = StdRng> {
    config: Config,
    /// Processors shared by every configuration of the sweep.
    pub ring: ProcessorRing,
    /// Generator shared by every configuration of the sweep.
    pub source: RandomSource<R>,
    convergence: ConvergenceLoop,
}

impl Simulator {
    /// Creates a simulator seeded from `config.general.seed`.
    ///
    /// # Errors
    ///
    /// Returns any validation error from [`Config::validate`].
    pub fn new(config: Config) -> Result<Self, SimError> {
        let source = RandomSource::seeded(config.general.seed);
        Self::with_source(config, source)
    }
}

impl<R: RngCore> Simulator<R> {
    /// Creates a simulator drawing from an existing generator.
    ///
    /// # Errors
    ///
    /// Returns any validation error from [`Config::validate`].
    pub fn with_source(config: Config, source: RandomSource<R>) -> Result<Self, SimError> {
        config.validate()?;
        let ring = ProcessorRing::build(config.general.processors)?;
        let convergence = ConvergenceLoop::new(&config);
        Ok(Self {
            config,
            ring,
            source,
            convergence,
        })
    }

    /// Configuration the simulator was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs a single configuration with `modules` memory modules.
    ///
    /// # Errors
    ///
    /// Propagates ring errors from the convergence loop.
    pub fn run_configuration(&mut self, modules: NonZeroUsize) -> Result<ConfigResult, SimError> {
        self.convergence
            .run(&mut self.ring, &mut self.source, modules)
    }

    /// Runs the full sweep, writing each average into `output[modules - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutputTooSmall`] before simulating anything if
    /// `output` holds fewer than `max_modules` values.
    pub fn run(&mut self, output: &mut [f64]) -> Result<SimStats, SimError> {
        let max_modules = self.config.sweep.max_modules;
        if output.len() < max_modules {
            return Err(SimError::OutputTooSmall {
                needed: max_modules,
                got: output.len(),
            });
        }

        let general = &self.config.general;
        info!(
            processors = general.processors,
            distribution = %general.distribution,
            seed = general.seed,
            max_modules,
            "starting sweep"
        );
        let mut stats = SimStats::new(general.processors, general.distribution, general.seed);

        for (modules, slot) in (1..=max_modules)
            .filter_map(NonZeroUsize::new)
            .zip(output.iter_mut())
        {
            let result = self.run_configuration(modules)?;
            *slot = result.avg_access_time;
            stats.record(result);
        }

        stats.finish();
        info!(
            configurations = stats.results.len(),
            total_cycles = stats.total_cycles(),
            unconverged = stats.unconverged().count(),
            host_seconds = stats.host_seconds,
            "sweep finished"
        );
        Ok(stats)
    }

    /// Runs the full sweep into freshly allocated storage.
    ///
    /// # Errors
    ///
    /// Propagates ring errors from the convergence loop.
    pub fn sweep(&mut self) -> Result<SimStats, SimError> {
        let mut output = vec![0.0; self.config.sweep.max_modules];
        self.run(&mut output)
    }
}

/// Runs a full default sweep for `processors` processors.
///
/// Uses 512 module counts, `epsilon = 0.02`, a cap of 1,000,000 cycles, a
/// normal spread of 5 and the default seed. `output[i]` receives the average
/// access time for `i + 1` modules.
///
/// # Errors
///
/// * [`SimError::InvalidProcessorCount`] when `processors` is zero.
/// * [`SimError::OutputTooSmall`] when `output` holds fewer than 512 values.
pub fn simulate(
    output: &mut [f64],
    processors: usize,
    distribution: Distribution,
) -> Result<SimStats, SimError> {
    let mut config = Config::default();
    config.general.processors = processors;
    config.general.distribution = distribution;
    Simulator::new(config)?.run(output)
}
