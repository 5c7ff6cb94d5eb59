//! Module-selection random source.
//!
//! This module implements the generator processors use to pick their next
//! memory module. It provides:
//! 1. **Raw draws:** 31-bit values in `[0, RAND_MAX]` taken from an injected `RngCore`.
//! 2. **Uniform selection:** `raw % max`.
//! 3. **Wrapped-normal selection:** A two-phase Box–Muller transform that reuses one
//!    cached uniform pair for a sine and a cosine variate, followed by odd-biased
//!    rounding and wrap-around into the module range.
//!
//! One `RandomSource` lives for a whole run. Its cached pair and phase carry
//! across configurations, so a seed reproduces a complete sweep exactly.

use std::f64::consts::PI;
use std::num::NonZeroUsize;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::common::constants::RAND_MAX;
use crate::config::Distribution;

/// Which half of the Box–Muller pair the next normal draw produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Draw a fresh uniform pair and return the sine variate.
    Sine,
    /// Reuse the cached pair and return the cosine variate.
    Cosine,
}

/// Stateful generator for module selection.
///
/// Generic over the underlying bit source so tests can inject a deterministic
/// `RngCore`; simulations use a seeded [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomSource<R = StdRng> {
    rng: R,
    /// Uniform pair `(U, V)` shared by the two phases.
    cached: (f64, f64),
    phase: Phase,
}

impl RandomSource<StdRng> {
    /// Creates a source backed by a [`StdRng`] seeded with `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource<R> {
    /// Wraps an existing bit source. The first normal draw starts a new pair.
    pub fn from_rng(rng: R) -> Self {
        Self {
            rng,
            cached: (0.0, 0.0),
            phase: Phase::Sine,
        }
    }

    /// Returns a raw draw in `[0, RAND_MAX]`.
    #[inline]
    pub fn raw(&mut self) -> u32 {
        self.rng.next_u32() >> 1
    }

    /// Returns a module index in `[0, max)`.
    #[inline]
    pub fn uniform(&mut self, max: NonZeroUsize) -> usize {
        self.raw() as usize % max.get()
    }

    /// Returns a standard normal variate.
    ///
    /// Odd calls draw `U` in `(0, 1)` and `V` in `[0, 1)` and return the sine
    /// branch; even calls reuse that pair and return the cosine branch.
    pub fn standard_normal(&mut self) -> f64 {
        let rand_max = f64::from(RAND_MAX);
        if self.phase == Phase::Sine {
            let u = (f64::from(self.raw()) + 1.0) / (rand_max + 2.0);
            let v = f64::from(self.raw()) / (rand_max + 1.0);
            self.cached = (u, v);
        }
        let (u, v) = self.cached;
        let radius = (-2.0 * u.ln()).sqrt();
        let z = match self.phase {
            Phase::Sine => radius * (2.0 * PI * v).sin(),
            Phase::Cosine => radius * (2.0 * PI * v).cos(),
        };
        self.phase = match self.phase {
            Phase::Sine => Phase::Cosine,
            Phase::Cosine => Phase::Sine,
        };
        z
    }

    /// Returns a module index drawn from a normal distribution around `mean`,
    /// rounded with an odd bias and wrapped into `[0, max)`.
    ///
    /// # Arguments
    ///
    /// * `mean` - Centre of the distribution, in module units.
    /// * `std_dev` - Spread of the distribution, in module units.
    /// * `max` - Number of modules; the result is reduced modulo this value.
    #[allow(clippy::suboptimal_flops)] // unfused, to round like the reference sequence
    pub fn wrapped_normal(&mut self, mean: f64, std_dev: f64, max: NonZeroUsize) -> usize {
        let value = std_dev * self.standard_normal() + mean;
        wrap_module(odd_biased(value), max)
    }

    /// Draws the next module for a processor with the given mean.
    ///
    /// `mean` and `std_dev` are only consulted for [`Distribution::Normal`].
    pub fn draw(
        &mut self,
        distribution: Distribution,
        mean: usize,
        std_dev: f64,
        max: NonZeroUsize,
    ) -> usize {
        match distribution {
            Distribution::Uniform => self.uniform(max),
            Distribution::Normal => self.wrapped_normal(mean as f64, std_dev, max),
        }
    }
}

/// Converts a real value to an integer, nudging even truncations up by one.
///
/// If `trunc(value)` is even the result is `trunc(value + 1)`, otherwise it is
/// `trunc(value)`. For non-negative inputs the result is always odd.
#[inline]
pub fn odd_biased(value: f64) -> i64 {
    let truncated = value as i64;
    if truncated % 2 == 0 {
        (value + 1.0) as i64
    } else {
        truncated
    }
}

/// Reduces `value` modulo `max`, shifting negative remainders into `[0, max)`.
#[inline]
pub fn wrap_module(value: i64, max: NonZeroUsize) -> usize {
    let max = max.get() as i64;
    let mut wrapped = value % max;
    if wrapped < 0 {
        wrapped += max;
    }
    wrapped as usize
}
