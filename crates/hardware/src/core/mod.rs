//! Simulation core: processors, contention, and module selection.
//!
//! This module contains the state a run evolves cycle by cycle:
//! 1. **Ring:** The round-robin processor queue with a movable head.
//! 2. **Allocator:** The per-cycle contention resolution against an occupancy table.
//! 3. **Units:** The module-selection generator.

/// Per-cycle contention resolution and the module occupancy table.
pub mod allocator;

/// Round-robin processor ring.
pub mod ring;

/// Functional units (module-selection generator).
pub mod units;

pub use allocator::{CycleAllocator, CycleOutcome, Occupancy};
pub use ring::{Processor, ProcessorRing};
pub use units::RandomSource;
