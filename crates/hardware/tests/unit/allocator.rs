//! # Cycle Allocator Tests
//!
//! Contention resolution, positional tie-breaking, and the occupancy table.

use memsim_core::common::ProcessorId;
use memsim_core::config::Distribution;
use memsim_core::core::{CycleAllocator, Occupancy, ProcessorRing, RandomSource};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::harness::{nz, zero_source};

fn uniform() -> CycleAllocator {
    CycleAllocator::new(Distribution::Uniform, 5.0)
}

#[test]
fn test_occupancy_claim_and_clear() {
    let mut occupancy = Occupancy::new(3);
    assert_eq!(occupancy.len(), 3);
    assert!(occupancy.claim(1, ProcessorId(4)));
    assert!(!occupancy.claim(1, ProcessorId(2)));
    assert_eq!(occupancy.holder(1), Some(ProcessorId(4)));
    assert_eq!(occupancy.holder(0), None);
    assert_eq!(occupancy.occupied(), 1);

    occupancy.clear();
    assert_eq!(occupancy.occupied(), 0);
    assert_eq!(occupancy.len(), 3);
}

#[test]
fn test_occupancy_rejects_missing_module() {
    let mut occupancy = Occupancy::new(2);
    assert!(!occupancy.claim(2, ProcessorId(1)));
    assert_eq!(occupancy.holder(2), None);
}

#[test]
fn test_occupancy_reset_resizes() {
    let mut occupancy = Occupancy::new(2);
    assert!(occupancy.claim(0, ProcessorId(1)));
    occupancy.reset(5);
    assert_eq!(occupancy.len(), 5);
    assert_eq!(occupancy.occupied(), 0);
    assert!(Occupancy::default().is_empty());
}

#[test]
fn test_single_module_grants_one_and_reports_next() {
    let mut ring = ProcessorRing::build(4).unwrap();
    let mut occupancy = Occupancy::new(1);
    let mut source = RandomSource::seeded(1);

    let outcome = uniform().allocate(&mut ring, &mut occupancy, &mut source, nz(1));

    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.denied, 3);
    assert_eq!(outcome.first_denied, Some(1));
    assert_eq!(occupancy.holder(0), Some(ProcessorId(1)));

    let accesses: Vec<u64> = ring.iter().map(|p| p.accesses).collect();
    assert_eq!(accesses, vec![1, 0, 0, 0]);

    ring.rotate_head_to(1).unwrap();
    assert_eq!(ring.head_processor().id, ProcessorId(2));
}

#[test]
fn test_tie_break_follows_ring_position() {
    let mut ring = ProcessorRing::build(3).unwrap();
    ring.rotate_head_to(2).unwrap();
    let mut occupancy = Occupancy::new(2);
    let mut source = zero_source();

    let outcome = uniform().allocate(&mut ring, &mut occupancy, &mut source, nz(2));

    // Processor 3 is visited first and takes module 0; processor 1 is next.
    assert_eq!(occupancy.holder(0), Some(ProcessorId(3)));
    assert_eq!(outcome.first_denied, Some(0));
    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.denied, 2);
}

#[test]
fn test_denied_processor_is_left_untouched() {
    let mut ring = ProcessorRing::build(2).unwrap();
    for p in ring.iter_mut() {
        p.target = 3;
        p.mean = 9;
        p.accesses = 5;
    }
    let mut occupancy = Occupancy::new(4);
    let mut source = zero_source();

    let outcome = uniform().allocate(&mut ring, &mut occupancy, &mut source, nz(4));

    let winner = ring.get(0).unwrap();
    assert_eq!(winner.accesses, 6);
    assert_eq!(winner.target, 0);
    let loser = ring.get(1).unwrap();
    assert_eq!(loser.accesses, 5);
    assert_eq!(loser.target, 3);
    assert_eq!(loser.mean, 9);
    assert_eq!(outcome.first_denied, Some(1));
}

#[test]
fn test_prior_claims_deny_their_modules() {
    let mut ring = ProcessorRing::build(2).unwrap();
    for (n, p) in ring.iter_mut().enumerate() {
        p.target = n;
    }
    let mut occupancy = Occupancy::new(2);
    assert!(occupancy.claim(1, ProcessorId(9)));
    let mut source = RandomSource::seeded(4);

    let outcome = uniform().allocate(&mut ring, &mut occupancy, &mut source, nz(2));
    assert_eq!(outcome.granted, 1);
    assert_eq!(outcome.first_denied, Some(1));
    assert_eq!(occupancy.holder(1), Some(ProcessorId(9)));
}

#[test]
fn test_normal_redraws_stay_in_range() {
    let mut ring = ProcessorRing::build(8).unwrap();
    for (n, p) in ring.iter_mut().enumerate() {
        p.target = n;
        p.mean = 6;
    }
    let mut occupancy = Occupancy::new(8);
    let mut source = RandomSource::seeded(8);
    let allocator = CycleAllocator::new(Distribution::Normal, 5.0);
    assert_eq!(allocator.distribution(), Distribution::Normal);

    let outcome = allocator.allocate(&mut ring, &mut occupancy, &mut source, nz(8));
    assert_eq!(outcome.denied, 0);
    assert!(ring.iter().all(|p| p.target < 8));
}

proptest! {
    #[test]
    fn prop_distinct_targets_never_deny(
        procs in 1usize..32,
        spare in 0usize..32,
        head_seed in any::<usize>(),
        seed in any::<u64>(),
    ) {
        let modules = procs + spare;
        let mut ring = ProcessorRing::build(procs).unwrap();
        for (slot, p) in ring.iter_slots_mut() {
            p.target = slot;
        }
        ring.rotate_head_to(head_seed % procs).unwrap();
        let mut occupancy = Occupancy::new(modules);
        let mut source = RandomSource::seeded(seed);

        let outcome = uniform().allocate(&mut ring, &mut occupancy, &mut source, nz(modules));

        prop_assert_eq!(outcome.denied, 0);
        prop_assert_eq!(outcome.first_denied, None);
        prop_assert_eq!(outcome.granted, procs);
        prop_assert_eq!(occupancy.occupied(), procs);
        prop_assert!(ring.iter().all(|p| p.accesses == 1 && p.target < modules));
    }
}
