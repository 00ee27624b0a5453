//! Benchmarks for the nodeheap containers.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- list_operations
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use std::collections::BTreeMap;
use std::time::Duration;

use nodeheap::{HeapConfig, List, OrderedMap};

// ============================================================================
// HELPER FUNCTIONS - Deterministic key generation
// ============================================================================

/// Generate a vector of deterministic keys (same seed = same keys).
fn generate_keys(count: usize, seed: u64) -> Vec<u64> {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen()).collect()
}

/// Build a map holding every key in `keys`.
fn populate_map(keys: &[u64]) -> OrderedMap<u64, u64> {
    let mut map = OrderedMap::with_capacity(keys.len());
    for &key in keys {
        let _ = map.insert(key, key);
    }
    map
}

// ============================================================================
// BENCHMARK: List Operations
// ============================================================================

fn bench_list_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_operations");

    group.measurement_time(Duration::from_secs(5));

    // Steady-state queue: one push and one pop per iteration, no arena growth
    group.bench_function("push_pop_bounded", |b| {
        let mut list = List::with_capacity(1024);
        for i in 0..512u64 {
            list.push_back(i).unwrap();
        }

        b.iter(|| {
            list.push_back(black_box(7)).unwrap();
            black_box(list.pop_front())
        });
    });

    group.bench_function("push_pop_ambient", |b| {
        let mut list = List::with_config(HeapConfig::default());
        for i in 0..512u64 {
            list.push_back(i).unwrap();
        }

        b.iter(|| {
            list.push_back(black_box(7)).unwrap();
            black_box(list.pop_front())
        });
    });

    group.bench_function("at_middle_of_1k", |b| {
        let mut list = List::with_capacity(1000);
        for i in 0..1000u64 {
            list.push_back(i).unwrap();
        }

        b.iter(|| black_box(list.at(black_box(500))));
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Map Operations
// ============================================================================

fn bench_map_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_operations");

    group.measurement_time(Duration::from_secs(5));

    let keys = generate_keys(10_000, 42);

    group.bench_function("get_in_10k", |b| {
        let map = populate_map(&keys);
        let mut i = 0;

        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(map.get(&keys[i]))
        });
    });

    group.bench_function("get_in_10k_btreemap", |b| {
        let map: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        let mut i = 0;

        b.iter(|| {
            i = (i + 1) % keys.len();
            black_box(map.get(&keys[i]))
        });
    });

    group.bench_function("remove_insert_in_10k", |b| {
        let mut map = populate_map(&keys);
        let mut i = 0;

        b.iter(|| {
            i = (i + 1) % keys.len();
            let value = map.remove(&keys[i]);
            black_box(map.insert(keys[i], value.unwrap_or_default()).is_ok())
        });
    });

    group.finish();
}

// ============================================================================
// BENCHMARK: Throughput
// ============================================================================

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(50);

    for batch_size in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(
            BenchmarkId::new("map_inserts", batch_size),
            &batch_size,
            |b, &size| {
                let keys = generate_keys(size, 42);

                b.iter_batched(
                    || keys.clone(),
                    |keys| populate_map(&keys).len(),
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(
            BenchmarkId::new("list_fill_drain", batch_size),
            &batch_size,
            |b, &size| {
                b.iter_batched(
                    || List::with_capacity(size),
                    |mut list| {
                        for i in 0..size {
                            let _ = list.push_back(i);
                        }
                        while let Some(v) = list.pop_front() {
                            black_box(v);
                        }
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// CRITERION ENTRY POINT
// ============================================================================

criterion_group!(
    benches,
    bench_list_operations,
    bench_map_operations,
    bench_throughput
);

criterion_main!(benches);
