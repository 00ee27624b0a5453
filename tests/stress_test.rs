//! Stress tests for the nodeheap containers.
//!
//! These tests verify:
//! 1. Containers stay consistent under long random operation sequences
//! 2. Exhaustion is reported, never hidden, and leaves contents intact
//! 3. Determinism is preserved across runs
//! 4. Freed slots are reused, so bounded heaps never drift
//!
//! ## Running Stress Tests
//!
//! ```bash
//! # Run all stress tests (release mode recommended)
//! cargo test --release --test stress_test -- --nocapture
//!
//! # Run specific test
//! cargo test --release --test stress_test verify_determinism -- --nocapture
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use nodeheap::{AmbientHeap, HeapConfig, HeapError, List, OrderedMap};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

/// Operations per randomized run
const STRESS_OP_COUNT: usize = 200_000;

/// Arena size for the bounded containers
const ARENA_CAPACITY: usize = 1_024;

/// Key space for map operations (larger than the arena, so it fills up)
const KEY_SPACE: u32 = 4_096;

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Run a deterministic mixed list/map sequence and digest the final contents.
fn run_deterministic_sequence(seed: u64, count: usize) -> [u8; 32] {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut list = List::with_capacity(ARENA_CAPACITY);
    let mut map = OrderedMap::with_capacity(ARENA_CAPACITY);

    for _ in 0..count {
        let value: u32 = rng.gen_range(0..KEY_SPACE);
        match rng.gen_range(0..6) {
            0 => {
                let _ = list.push_back(value);
            }
            1 => {
                let _ = list.push_front(value);
            }
            2 => {
                list.pop_front();
            }
            3 => {
                let _ = map.insert(value, u64::from(value) * 3);
            }
            4 => {
                map.remove(&value);
            }
            _ => {
                if let Some(v) = map.get_mut(&value) {
                    *v += 1;
                }
            }
        }
    }

    let mut hasher = Sha256::new();
    for value in &list {
        hasher.update(value.to_le_bytes());
    }
    for (key, value) in &map {
        hasher.update(key.to_le_bytes());
        hasher.update(value.to_le_bytes());
    }
    hasher.finalize().into()
}

// ============================================================================
// STRESS TESTS
// ============================================================================

/// List against a `VecDeque` model under random pushes and pops.
///
/// # Verification
/// - Same contents after every step that changes them
/// - Exhaustion exactly when the model holds `ARENA_CAPACITY` entries
#[test]
fn stress_list_matches_model() {
    println!("\n=== STRESS TEST: List ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut list = List::with_capacity(ARENA_CAPACITY);
    let mut model = VecDeque::new();
    let mut refused = 0;

    let start = Instant::now();
    for step in 0..STRESS_OP_COUNT {
        let value: u32 = rng.gen();
        match rng.gen_range(0..5) {
            0 | 1 => match list.push_back(value) {
                Ok(()) => model.push_back(value),
                Err(err) => {
                    assert_eq!(model.len(), ARENA_CAPACITY);
                    assert_eq!(err.into_inner(), value);
                    refused += 1;
                }
            },
            2 => match list.push_front(value) {
                Ok(()) => model.push_front(value),
                Err(_) => {
                    assert_eq!(model.len(), ARENA_CAPACITY);
                    refused += 1;
                }
            },
            3 => assert_eq!(list.pop_front(), model.pop_front()),
            _ => assert_eq!(list.pop_back(), model.pop_back()),
        }

        assert_eq!(list.front(), model.front());
        assert_eq!(list.back(), model.back());
        if step % 10_000 == 0 {
            assert!(list.iter().eq(model.iter()));
        }
    }
    let elapsed = start.elapsed();

    println!("  Operations:        {:>12}", STRESS_OP_COUNT);
    println!("  Refused inserts:   {:>12}", refused);
    println!("  Final length:      {:>12}", model.len());
    println!("  Elapsed time:      {:>12.2?}", elapsed);

    assert!(list.iter().eq(model.iter()));
    assert_eq!(list.len(), model.len());

    println!("\n=== LIST STRESS PASSED ===\n");
}

/// OrderedMap against a `BTreeMap` model under random inserts and removals.
#[test]
fn stress_map_matches_model() {
    println!("\n=== STRESS TEST: OrderedMap ===\n");

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut map = OrderedMap::with_capacity(ARENA_CAPACITY);
    let mut model = BTreeMap::new();
    let mut refused = 0;

    let start = Instant::now();
    for _ in 0..STRESS_OP_COUNT {
        let key: u32 = rng.gen_range(0..KEY_SPACE);
        match rng.gen_range(0..3) {
            0 => match map.emplace(key, key) {
                Ok((cursor, inserted)) => {
                    assert_eq!(inserted, !model.contains_key(&key));
                    assert_eq!(cursor.key(), Some(&key));
                    model.entry(key).or_insert(key);
                }
                Err(err) => {
                    assert_eq!(err.error(), HeapError::Exhausted { capacity: ARENA_CAPACITY });
                    assert_eq!(model.len(), ARENA_CAPACITY);
                    refused += 1;
                }
            },
            1 => assert_eq!(map.remove(&key), model.remove(&key)),
            _ => assert_eq!(map.get(&key), model.get(&key)),
        }
        assert_eq!(map.len(), model.len());
    }
    let elapsed = start.elapsed();

    println!("  Operations:        {:>12}", STRESS_OP_COUNT);
    println!("  Refused inserts:   {:>12}", refused);
    println!("  Final size:        {:>12}", map.len());
    println!("  Elapsed time:      {:>12.2?}", elapsed);

    assert!(map.iter().eq(model.iter()));
    assert!(map.keys().rev().eq(model.keys().rev()));

    println!("\n=== MAP STRESS PASSED ===\n");
}

/// Verify determinism: same sequence produces an identical digest.
#[test]
fn verify_determinism() {
    println!("\n=== DETERMINISM TEST ===\n");

    const TEST_COUNT: usize = 20_000;
    const SEED: u64 = 12345;

    println!("Running sequence with {} operations (seed={})...", TEST_COUNT, SEED);

    let digest1 = run_deterministic_sequence(SEED, TEST_COUNT);
    let digest2 = run_deterministic_sequence(SEED, TEST_COUNT);

    println!("  Run 1 digest:   {}", hex::encode(digest1));
    println!("  Run 2 digest:   {}", hex::encode(digest2));

    assert_eq!(digest1, digest2, "Digests must match for determinism");

    let digest3 = run_deterministic_sequence(SEED + 1, TEST_COUNT);
    println!("  Different seed: {}", hex::encode(digest3));
    assert_ne!(digest1, digest3, "Different seeds should produce different digests");

    println!("\n=== DETERMINISM VERIFIED ===\n");
}

/// Exhaustion: capacity K accepts exactly K entries and keeps them intact.
#[test]
fn stress_exhaustion_boundary() {
    for capacity in [1, 2, 7, 64, ARENA_CAPACITY] {
        let mut list = List::with_capacity(capacity);
        for i in 0..capacity {
            list.push_back(i).unwrap();
        }
        assert_eq!(list.available(), 0);
        assert_eq!(list.push_back(capacity).unwrap_err().into_inner(), capacity);
        assert!(list.iter().copied().eq(0..capacity));

        let mut map = OrderedMap::with_capacity(capacity);
        for i in (0..capacity).rev() {
            map.insert(i, ()).unwrap();
        }
        assert!(map.insert(capacity, ()).is_err());
        assert!(map.keys().copied().eq(0..capacity));
    }
}

/// Bounded heaps reuse freed slots: churn never exhausts a half-full arena.
#[test]
fn stress_slot_reuse() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut list = List::with_capacity(ARENA_CAPACITY);

    for i in 0..ARENA_CAPACITY / 2 {
        list.push_back(i).unwrap();
    }
    for _ in 0..STRESS_OP_COUNT {
        let value = rng.gen_range(0..usize::MAX);
        list.push_back(value).unwrap();
        assert!(list.pop_front().is_some());
    }

    assert_eq!(list.len(), ARENA_CAPACITY / 2);
    assert_eq!(list.available(), ARENA_CAPACITY / 2);
}

/// Several containers share one ambient budget; the budget is returned on drop.
#[test]
fn stress_shared_ambient_budget() {
    let pool = AmbientHeap::with_limit(64 * 1024);
    let mut lists: Vec<List<u64>> = (0..4)
        .map(|_| List::with_config(HeapConfig::shared(pool.clone())))
        .collect();

    let mut pushed = 0usize;
    'fill: loop {
        for list in &mut lists {
            match list.push_back(pushed as u64) {
                Ok(()) => pushed += 1,
                Err(err) => {
                    assert!(matches!(err.error(), HeapError::AmbientExhausted { .. }));
                    break 'fill;
                }
            }
        }
    }

    println!("  Entries before exhaustion: {}", pushed);
    assert!(pushed > 0);
    assert!(pool.available() < pool.limit());

    let total: usize = lists.iter().map(List::len).sum();
    assert_eq!(total, pushed);

    drop(lists);
    assert_eq!(pool.used(), 0);
}
