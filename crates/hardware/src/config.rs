//! Configuration system for the contention simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a sweep. It provides:
//! 1. **Defaults:** Baseline constants (sweep bound, tolerance, cycle cap, spread, seed).
//! 2. **Structures:** Hierarchical config for general, sweep, convergence, and normal settings.
//! 3. **Enums:** The module-selection [`Distribution`].
//!
//! Configuration is supplied as JSON (`Config::from_json_str`) or built from
//! `Config::default()` and overridden field by field, as the CLI does.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::SimError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline sweep when not explicitly overridden
/// in a JSON configuration.
mod defaults {
    use crate::common::constants;

    /// Number of processors sharing the modules.
    pub const PROCESSORS: usize = 4;

    /// Upper bound of the module-count sweep.
    pub const MAX_MODULES: usize = constants::NUM_MEMORY_MODULES;

    /// Relative tolerance between consecutive cycle averages.
    pub const EPSILON: f64 = constants::CONVERGENCE_EPSILON;

    /// Cycle cap per module count.
    pub const CYCLE_CAP: u64 = constants::MAX_CPU_CYCLES;

    /// Standard deviation of the wrapped-normal selection.
    pub const STD_DEV: f64 = constants::STANDARD_DEVIATION;

    /// Generator seed.
    pub const SEED: u64 = constants::DEFAULT_SEED;
}

/// Module-selection distribution.
///
/// Decides how a processor picks the next memory module it will demand after
/// each successful access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Distribution {
    /// Every module is equally likely.
    #[default]
    #[serde(alias = "uniform", alias = "u")]
    Uniform,
    /// Normal around the processor's mean, wrapped into the module range.
    #[serde(alias = "normal", alias = "n")]
    Normal,
}

impl Distribution {
    /// Maps a single-character selector with the legacy permissive rule.
    ///
    /// `'u'` selects [`Distribution::Uniform`]; every other character selects
    /// [`Distribution::Normal`]. Characters other than `'n'` are accepted but
    /// logged, since they most likely indicate a caller mistake. Use
    /// [`str::parse`] for strict validation.
    pub fn from_selector(selector: char) -> Self {
        match selector {
            'u' => Self::Uniform,
            'n' => Self::Normal,
            other => {
                tracing::warn!(
                    selector = %other,
                    "unrecognized distribution selector, falling back to normal"
                );
                Self::Normal
            }
        }
    }
}

impl FromStr for Distribution {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uniform" | "u" => Ok(Self::Uniform),
            "normal" | "n" => Ok(Self::Normal),
            _ => Err(SimError::InvalidDistribution(s.to_string())),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => write!(f, "uniform"),
            Self::Normal => write!(f, "normal"),
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// Every section and field is optional in JSON; missing values take the
/// defaults below.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use memsim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.sweep.max_modules, 512);
/// assert_eq!(config.convergence.cycle_cap, 1_000_000);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use memsim_core::config::{Config, Distribution};
///
/// let json = r#"{
///     "general": { "processors": 8, "distribution": "Normal", "seed": 42 },
///     "sweep": { "max_modules": 64 },
///     "normal": { "std_dev": 3.0 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.general.processors, 8);
/// assert_eq!(config.general.distribution, Distribution::Normal);
/// assert_eq!(config.sweep.max_modules, 64);
/// assert!((config.convergence.epsilon - 0.02).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Population, distribution and seed
    #[serde(default)]
    pub general: GeneralConfig,
    /// Module-count sweep bound
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Convergence criterion
    #[serde(default)]
    pub convergence: ConvergenceConfig,
    /// Wrapped-normal parameters
    #[serde(default)]
    pub normal: NormalConfig,
}

impl Config {
    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] for malformed JSON and any error from
    /// [`Config::validate`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config = Self::parse_json_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from JSON without validating it.
    ///
    /// For callers that adjust fields after loading. `Simulator::new`
    /// validates the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] for malformed JSON.
    pub fn parse_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks every precondition a sweep relies on.
    ///
    /// # Errors
    ///
    /// * [`SimError::InvalidProcessorCount`] when `processors` is zero.
    /// * [`SimError::InvalidModuleBound`] when `max_modules` is zero.
    /// * [`SimError::InvalidConfig`] for a non-positive or non-finite epsilon,
    ///   a zero cycle cap, or a negative or non-finite standard deviation.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.general.processors < 1 {
            return Err(SimError::InvalidProcessorCount(self.general.processors));
        }
        if self.sweep.max_modules < 1 {
            return Err(SimError::InvalidModuleBound(self.sweep.max_modules));
        }
        let epsilon = self.convergence.epsilon;
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "convergence epsilon must be a positive number, got {epsilon}"
            )));
        }
        if self.convergence.cycle_cap == 0 {
            return Err(SimError::InvalidConfig(
                "cycle cap must be at least one cycle".to_string(),
            ));
        }
        let std_dev = self.normal.std_dev;
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "standard deviation must be a non-negative number, got {std_dev}"
            )));
        }
        Ok(())
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Number of processors in the ring
    #[serde(default = "GeneralConfig::default_processors")]
    pub processors: usize,

    /// Module-selection distribution
    #[serde(default)]
    pub distribution: Distribution,

    /// Seed for the module-selection generator
    #[serde(default = "GeneralConfig::default_seed")]
    pub seed: u64,
}

impl GeneralConfig {
    fn default_processors() -> usize {
        defaults::PROCESSORS
    }

    fn default_seed() -> u64 {
        defaults::SEED
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            processors: defaults::PROCESSORS,
            distribution: Distribution::default(),
            seed: defaults::SEED,
        }
    }
}

/// Module-count sweep configuration.
///
/// The sweep runs one configuration for every module count in
/// `1..=max_modules`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
    /// Largest module count simulated
    #[serde(default = "SweepConfig::default_max_modules")]
    pub max_modules: usize,
}

impl SweepConfig {
    fn default_max_modules() -> usize {
        defaults::MAX_MODULES
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            max_modules: defaults::MAX_MODULES,
        }
    }
}

/// Convergence criterion for one module-count configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConvergenceConfig {
    /// Relative change below which the average access time is considered stable
    #[serde(default = "ConvergenceConfig::default_epsilon")]
    pub epsilon: f64,

    /// Maximum cycles simulated before giving up on convergence
    #[serde(default = "ConvergenceConfig::default_cycle_cap")]
    pub cycle_cap: u64,
}

impl ConvergenceConfig {
    fn default_epsilon() -> f64 {
        defaults::EPSILON
    }

    fn default_cycle_cap() -> u64 {
        defaults::CYCLE_CAP
    }
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            epsilon: defaults::EPSILON,
            cycle_cap: defaults::CYCLE_CAP,
        }
    }
}

/// Wrapped-normal selection parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NormalConfig {
    /// Standard deviation around each processor's mean
    #[serde(default = "NormalConfig::default_std_dev")]
    pub std_dev: f64,
}

impl NormalConfig {
    fn default_std_dev() -> f64 {
        defaults::STD_DEV
    }
}

impl Default for NormalConfig {
    fn default() -> Self {
        Self {
            std_dev: defaults::STD_DEV,
        }
    }
}
