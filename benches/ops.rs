//! Micro-operation benchmarks for every byte-budgeted cache.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for get hits, inserts that force evictions,
//! and a mixed read/write stream under identical conditions.

use std::hint::black_box;
use std::time::Instant;

use bytecache::policy::arc::ArcCache;
use bytecache::policy::fifo::FifoStore;
use bytecache::policy::lru::LruStore;
use bytecache::traits::ByteCache;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const ENTRIES: usize = 4096;
const VALUE_BYTES: usize = 32;
const OPS: u64 = 100_000;

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key:{:08}", i)).collect()
}

fn capacity_bytes() -> usize {
    // "key:" + 8 digits = 12 bytes of key per entry.
    ENTRIES * (12 + VALUE_BYTES)
}

fn warmed<C: ByteCache<String, Vec<u8>>>(mut cache: C, keys: &[String]) -> C {
    for k in keys {
        cache.set(k.clone(), vec![0; VALUE_BYTES]);
    }
    cache
}

macro_rules! for_each_policy {
    ($group:expr, $name:ident => $bench:expr) => {{
        $group.bench_function("fifo", |b| {
            let $name = || FifoStore::<String, Vec<u8>>::new(capacity_bytes());
            ($bench)(b, $name)
        });
        $group.bench_function("lru", |b| {
            let $name = || LruStore::<String, Vec<u8>>::new(capacity_bytes());
            ($bench)(b, $name)
        });
        $group.bench_function("arc", |b| {
            let $name = || ArcCache::<String, Vec<u8>>::new(capacity_bytes());
            ($bench)(b, $name)
        });
    }};
}

// ============================================================================
// Get Hit Latency
// ============================================================================

fn get_hit<C, F>(b: &mut criterion::Bencher<'_>, make: F)
where
    C: ByteCache<String, Vec<u8>>,
    F: Fn() -> C,
{
    let keys = keys(ENTRIES);
    b.iter_custom(|iters| {
        let mut cache = warmed(make(), &keys);
        let start = Instant::now();
        for _ in 0..iters {
            for i in 0..OPS as usize {
                black_box(cache.get(&keys[i % ENTRIES]));
            }
        }
        start.elapsed()
    })
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit");
    group.throughput(Throughput::Elements(OPS));
    for_each_policy!(group, make => get_hit);
    group.finish();
}

// ============================================================================
// Insert With Eviction
// ============================================================================

fn insert_evict<C, F>(b: &mut criterion::Bencher<'_>, make: F)
where
    C: ByteCache<String, Vec<u8>>,
    F: Fn() -> C,
{
    let warm = keys(ENTRIES);
    let fresh: Vec<String> = (ENTRIES..ENTRIES + OPS as usize)
        .map(|i| format!("key:{:08}", i))
        .collect();
    b.iter_batched(
        || warmed(make(), &warm),
        |mut cache| {
            for k in &fresh {
                black_box(cache.set(k.clone(), vec![1; VALUE_BYTES]));
            }
            cache
        },
        BatchSize::LargeInput,
    )
}

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict");
    group.throughput(Throughput::Elements(OPS));
    group.sample_size(20);
    for_each_policy!(group, make => insert_evict);
    group.finish();
}

// ============================================================================
// Mixed Workload (80% get / 20% set, skewed keys)
// ============================================================================

fn mixed<C, F>(b: &mut criterion::Bencher<'_>, make: F)
where
    C: ByteCache<String, Vec<u8>>,
    F: Fn() -> C,
{
    let universe = keys(ENTRIES * 4);
    let mut rng = SmallRng::seed_from_u64(42);
    let trace: Vec<(bool, usize)> = (0..OPS)
        .map(|_| {
            let hot = rng.random_bool(0.8);
            let idx = if hot {
                rng.random_range(0..ENTRIES / 2)
            } else {
                rng.random_range(0..universe.len())
            };
            (rng.random_bool(0.8), idx)
        })
        .collect();

    b.iter_batched(
        make,
        |mut cache| {
            for &(is_get, idx) in &trace {
                let k = &universe[idx];
                if is_get {
                    black_box(cache.get(k));
                } else {
                    black_box(cache.set(k.clone(), vec![2; VALUE_BYTES]));
                }
            }
            cache
        },
        BatchSize::LargeInput,
    )
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(OPS));
    group.sample_size(20);
    for_each_policy!(group, make => mixed);
    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evict, bench_mixed);
criterion_main!(benches);
