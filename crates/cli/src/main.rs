//! Memory contention simulator CLI.
//!
//! This binary runs a module-count sweep and reports the average access time
//! for every module count. It performs:
//! 1. **Configuration:** Built-in defaults, optionally loaded from a JSON file, then
//!    overridden by explicit flags.
//! 2. **Sweep:** One convergence run per module count in `1..=max_modules`.
//! 3. **Reporting:** Sectioned text statistics, CSV rows, or a JSON document.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::{fs, io, process};
use tracing_subscriber::EnvFilter;

use memsim_core::config::{Config, Distribution};
use memsim_core::stats::{STATS_SECTIONS, SimStats};
use memsim_core::{SimError, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Shared memory-module contention simulator",
    long_about = "Estimate the average memory access time of a processor population for every memory-module count in a sweep.\n\nExamples:\n  memsim run -p 8 -d uniform\n  memsim run -p 16 -d normal --seed 7 --format csv > normal.csv\n  memsim run --config sweep.json --stats summary"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a module-count sweep.
    Run {
        /// JSON configuration file; explicit flags override its values.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of processors sharing the modules.
        #[arg(short, long)]
        processors: Option<usize>,

        /// Module-selection distribution (uniform or normal).
        #[arg(short, long)]
        distribution: Option<Distribution>,

        /// Generator seed.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Largest module count in the sweep.
        #[arg(short, long)]
        modules: Option<usize>,

        /// Relative change below which a configuration has converged.
        #[arg(long)]
        epsilon: Option<f64>,

        /// Cycle cap per configuration.
        #[arg(long)]
        cycle_cap: Option<u64>,

        /// Standard deviation of the normal distribution.
        #[arg(long)]
        std_dev: Option<f64>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Statistics sections to print with the table format (default: all).
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(STATS_SECTIONS.iter().copied()))]
        stats: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable statistics sections.
    Table,
    /// One `modules,avg_access_time,cycles,converged` row per configuration.
    Csv,
    /// The full report as a JSON document.
    Json,
}

/// Flag overrides applied on top of the loaded configuration.
#[derive(Debug, Default)]
struct Overrides {
    processors: Option<usize>,
    distribution: Option<Distribution>,
    seed: Option<u64>,
    modules: Option<usize>,
    epsilon: Option<f64>,
    cycle_cap: Option<u64>,
    std_dev: Option<f64>,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(p) = self.processors {
            config.general.processors = p;
        }
        if let Some(d) = self.distribution {
            config.general.distribution = d;
        }
        if let Some(s) = self.seed {
            config.general.seed = s;
        }
        if let Some(m) = self.modules {
            config.sweep.max_modules = m;
        }
        if let Some(e) = self.epsilon {
            config.convergence.epsilon = e;
        }
        if let Some(c) = self.cycle_cap {
            config.convergence.cycle_cap = c;
        }
        if let Some(sd) = self.std_dev {
            config.normal.std_dev = sd;
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            config,
            processors,
            distribution,
            seed,
            modules,
            epsilon,
            cycle_cap,
            std_dev,
            format,
            stats,
        }) => {
            let overrides = Overrides {
                processors,
                distribution,
                seed,
                modules,
                epsilon,
                cycle_cap,
                std_dev,
            };
            if let Err(e) = cmd_run(config.as_deref(), overrides, format, &stats) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        None => {
            eprintln!("Memory contention simulator: pass a subcommand");
            eprintln!();
            eprintln!("  memsim run -p <processors> -d <uniform|normal>   Run a sweep");
            eprintln!("  memsim run --config <sweep.json>                 Run a configured sweep");
            eprintln!();
            eprintln!("  memsim --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the configuration, applies overrides, runs the sweep, and reports it.
fn cmd_run(
    config_path: Option<&str>,
    overrides: Overrides,
    format: OutputFormat,
    sections: &[String],
) -> Result<(), SimError> {
    let config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading config {path}: {e}");
                process::exit(1);
            });
            Config::parse_json_str(&json)?
        }
        None => Config::default(),
    };
    let mut sim = configured(config, overrides)?;
    let stats = sim.sweep()?;
    report(&stats, format, sections);
    Ok(())
}

/// Applies flag overrides to a loaded configuration and validates the result.
fn configured(mut config: Config, overrides: Overrides) -> Result<Simulator, SimError> {
    overrides.apply(&mut config);
    Simulator::new(config)
}

fn report(stats: &SimStats, format: OutputFormat, sections: &[String]) {
    match format {
        OutputFormat::Table => stats.print_sections(sections),
        OutputFormat::Csv => {
            let mut out = io::stdout().lock();
            if let Err(e) = stats.write_csv(&mut out).and_then(|()| out.flush()) {
                eprintln!("Error writing CSV: {e}");
                process::exit(1);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing report: {e}");
                process::exit(1);
            }
        },
    }
}
