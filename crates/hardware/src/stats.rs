//! Sweep statistics collection and reporting.
//!
//! This module gathers the per-configuration results of a run. It provides:
//! 1. **Results:** One [`ConfigResult`] per module count, in sweep order.
//! 2. **Aggregates:** Averages, total cycles, and unconverged configurations.
//! 3. **Output:** Sectioned text reports, CSV, and `serde` serialization for JSON.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::config::Distribution;
use crate::sim::convergence::ConfigResult;

/// Results of a module-count sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Wall-clock seconds spent in the sweep, set by [`SimStats::finish`].
    pub host_seconds: f64,
    /// Processors in the ring.
    pub processors: usize,
    /// Module-selection distribution.
    pub distribution: Distribution,
    /// Generator seed.
    pub seed: u64,
    /// One entry per module count, in sweep order.
    pub results: Vec<ConfigResult>,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"sweep"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "sweep"];

impl SimStats {
    /// Starts an empty report; the host clock starts now.
    pub fn new(processors: usize, distribution: Distribution, seed: u64) -> Self {
        Self {
            start_time: Instant::now(),
            host_seconds: 0.0,
            processors,
            distribution,
            seed,
            results: Vec::new(),
        }
    }

    /// Appends the result of the next configuration.
    pub fn record(&mut self, result: ConfigResult) {
        self.results.push(result);
    }

    /// Stops the host clock.
    pub fn finish(&mut self) {
        self.host_seconds = self.start_time.elapsed().as_secs_f64();
    }

    /// Average access times in sweep order.
    pub fn averages(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.avg_access_time).collect()
    }

    /// Cycles simulated across every configuration.
    pub fn total_cycles(&self) -> u64 {
        self.results.iter().map(|r| r.cycles).sum()
    }

    /// Configurations that hit the cycle cap.
    pub fn unconverged(&self) -> impl Iterator<Item = &ConfigResult> {
        self.results.iter().filter(|r| !r.converged)
    }

    /// Result for a module count, if it was simulated.
    pub fn result_for(&self, modules: usize) -> Option<&ConfigResult> {
        self.results.iter().find(|r| r.modules == modules)
    }

    /// Writes `modules,avg_access_time,cycles,converged` rows with a header.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "modules,avg_access_time,cycles,converged")?;
        for r in &self.results {
            writeln!(
                out,
                "{},{:.6},{},{}",
                r.modules, r.avg_access_time, r.cycles, r.converged
            )?;
        }
        Ok(())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"` or `"sweep"`.
    /// Pass an empty slice to print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            let configs = self.results.len();
            let unconverged = self.unconverged().count();
            let mean_cycles = if configs == 0 {
                0.0
            } else {
                self.total_cycles() as f64 / configs as f64
            };
            println!("\n==========================================================");
            println!("MEMORY CONTENTION SWEEP STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", self.host_seconds);
            println!("processors               {}", self.processors);
            println!("distribution             {}", self.distribution);
            println!("seed                     {}", self.seed);
            println!("configurations           {configs}");
            println!("sim_cycles               {}", self.total_cycles());
            println!("cycles_per_config        {mean_cycles:.2}");
            println!("unconverged              {unconverged}");
            println!("----------------------------------------------------------");
        }
        if want("sweep") {
            println!("SWEEP");
            println!("  {:>7}  {:>14}  {:>9}  converged", "modules", "avg_access", "cycles");
            for r in &self.results {
                println!(
                    "  {:>7}  {:>14.6}  {:>9}  {}",
                    r.modules,
                    r.avg_access_time,
                    r.cycles,
                    if r.converged { "yes" } else { "NO" }
                );
            }
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
