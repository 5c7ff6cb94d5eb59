//! Round-robin processor ring.
//!
//! Processors are stored in an owned vector in construction order; the ring
//! is closed by traversal, which starts at the head slot, runs to the end of
//! the vector, and wraps to slot 0. Rotating priority to another processor is
//! a head index reassignment, so the visiting order of the ring never changes.

use std::iter::Chain;
use std::ops::Range;

use crate::common::{ProcessorId, SimError};

/// One processor competing for memory modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processor {
    /// Stable identity, numbered from 1.
    pub id: ProcessorId,
    /// Module the processor will demand in the next cycle.
    pub target: usize,
    /// Successful accesses in the current configuration.
    pub accesses: u64,
    /// Centre of the wrapped-normal selection for this processor.
    pub mean: usize,
}

impl Processor {
    fn new(id: ProcessorId) -> Self {
        Self {
            id,
            target: 0,
            accesses: 0,
            mean: 0,
        }
    }
}

/// Slot indices of a ring in traversal order.
pub type Slots = Chain<Range<usize>, Range<usize>>;

/// Fixed-size circular collection of processors with a movable head.
#[derive(Debug, Clone)]
pub struct ProcessorRing {
    processors: Vec<Processor>,
    head: usize,
}

impl ProcessorRing {
    /// Builds a ring of `count` processors with identities `1..=count`.
    ///
    /// The head starts at the first processor built.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidProcessorCount`] when `count` is zero.
    pub fn build(count: usize) -> Result<Self, SimError> {
        if count < 1 {
            return Err(SimError::InvalidProcessorCount(count));
        }
        let processors = (1..=count)
            .map(|n| Processor::new(ProcessorId(n)))
            .collect();
        Ok(Self {
            processors,
            head: 0,
        })
    }

    /// Number of processors in the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// False for any ring created by [`ProcessorRing::build`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Slot of the current head.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// The processor at the current head.
    pub fn head_processor(&self) -> &Processor {
        &self.processors[self.head]
    }

    /// Processor stored at `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&Processor> {
        self.processors.get(slot)
    }

    /// Moves the head to `slot` without changing the visiting order.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::RingSlotOutOfRange`] when `slot` is not a ring member.
    pub fn rotate_head_to(&mut self, slot: usize) -> Result<(), SimError> {
        if slot >= self.processors.len() {
            return Err(SimError::RingSlotOutOfRange {
                slot,
                len: self.processors.len(),
            });
        }
        self.head = slot;
        Ok(())
    }

    /// Slot indices from the head, visiting each member once.
    ///
    /// The start is captured when the iterator is created, so a later
    /// rotation does not affect an iterator already in use.
    pub fn slots(&self) -> Slots {
        (self.head..self.processors.len()).chain(0..self.head)
    }

    /// Processors from the head, visiting each member once.
    pub fn iter(&self) -> impl Iterator<Item = &Processor> {
        let (front, back) = self.processors.split_at(self.head);
        back.iter().chain(front.iter())
    }

    /// Mutable processors from the head, visiting each member once.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Processor> {
        let (front, back) = self.processors.split_at_mut(self.head);
        back.iter_mut().chain(front.iter_mut())
    }

    /// Mutable processors from the head, paired with their slot.
    pub fn iter_slots_mut(&mut self) -> impl Iterator<Item = (usize, &mut Processor)> {
        let head = self.head;
        let (front, back) = self.processors.split_at_mut(head);
        back.iter_mut()
            .enumerate()
            .map(move |(offset, processor)| (head + offset, processor))
            .chain(front.iter_mut().enumerate())
    }

    /// Clears every access counter, ending a configuration.
    pub fn reset_accesses(&mut self) {
        for processor in &mut self.processors {
            processor.accesses = 0;
        }
    }
}
