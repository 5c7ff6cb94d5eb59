//! Per-cycle contention resolution.
//!
//! This module resolves one cycle of module demands. It provides:
//! 1. **Occupancy:** A scratch table recording which processor holds each module.
//! 2. **Allocation:** A single ring pass granting free modules in visit order,
//!    redrawing targets for winners, and remembering the first loser.
//!
//! Ties are broken purely by position: whichever processor the pass visits
//! first claims the module.

use std::num::NonZeroUsize;

use rand::RngCore;

use crate::common::ProcessorId;
use crate::config::Distribution;
use crate::core::ring::ProcessorRing;
use crate::core::units::RandomSource;

/// Module ownership for the current cycle.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    holders: Vec<Option<ProcessorId>>,
}

impl Occupancy {
    /// Creates a table of `modules` free slots.
    pub fn new(modules: usize) -> Self {
        Self {
            holders: vec![None; modules],
        }
    }

    /// Resizes the table to `modules` slots and frees all of them.
    pub fn reset(&mut self, modules: usize) {
        self.holders.clear();
        self.holders.resize(modules, None);
    }

    /// Frees every module for the next cycle.
    pub fn clear(&mut self) {
        self.holders.fill(None);
    }

    /// Number of modules tracked.
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    /// True when no modules are tracked.
    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Processor holding `module` this cycle, if any.
    pub fn holder(&self, module: usize) -> Option<ProcessorId> {
        self.holders.get(module).copied().flatten()
    }

    /// Claims `module` for `id`.
    ///
    /// Returns false if the module is already held or does not exist.
    pub fn claim(&mut self, module: usize, id: ProcessorId) -> bool {
        match self.holders.get_mut(module) {
            Some(slot) if slot.is_none() => {
                *slot = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Number of modules held this cycle.
    pub fn occupied(&self) -> usize {
        self.holders.iter().filter(|h| h.is_some()).count()
    }
}

/// Result of one allocation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CycleOutcome {
    /// Slot of the first processor denied in visit order.
    pub first_denied: Option<usize>,
    /// Processors granted their module.
    pub granted: usize,
    /// Processors denied their module.
    pub denied: usize,
}

/// Resolves module demands for one cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleAllocator {
    distribution: Distribution,
    std_dev: f64,
}

impl CycleAllocator {
    /// Creates an allocator redrawing targets from `distribution`.
    ///
    /// `std_dev` is only used by [`Distribution::Normal`].
    pub fn new(distribution: Distribution, std_dev: f64) -> Self {
        Self {
            distribution,
            std_dev,
        }
    }

    /// Distribution winners redraw from.
    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    /// Draws a target for a processor with the given mean.
    #[inline]
    pub fn draw_target<R: RngCore>(
        &self,
        source: &mut RandomSource<R>,
        mean: usize,
        modules: NonZeroUsize,
    ) -> usize {
        source.draw(self.distribution, mean, self.std_dev, modules)
    }

    /// Walks the ring once from its head and grants free modules.
    ///
    /// A processor whose target is free claims it, counts an access, and
    /// draws a new target. A processor whose target is taken is left
    /// unchanged; the first such processor is reported.
    ///
    /// # Arguments
    ///
    /// * `ring` - Processors in priority order; the ring itself is not rotated.
    /// * `occupancy` - Module table for this cycle, expected to start free.
    /// * `source` - Generator used for the winners' new targets.
    /// * `modules` - Module count; every target must already be below it.
    pub fn allocate<R: RngCore>(
        &self,
        ring: &mut ProcessorRing,
        occupancy: &mut Occupancy,
        source: &mut RandomSource<R>,
        modules: NonZeroUsize,
    ) -> CycleOutcome {
        let mut outcome = CycleOutcome::default();
        for (slot, processor) in ring.iter_slots_mut() {
            if occupancy.claim(processor.target, processor.id) {
                processor.accesses += 1;
                processor.target = self.draw_target(source, processor.mean, modules);
                outcome.granted += 1;
            } else {
                outcome.denied += 1;
                if outcome.first_denied.is_none() {
                    outcome.first_denied = Some(slot);
                }
            }
        }
        outcome
    }
}
