//! Hit-ratio comparison of ARC against LRU and FIFO.
//!
//! Run with: `cargo bench --bench hit_ratio`
//!
//! Replays seeded traces through each policy, prints the resulting hit ratio
//! once per trace, and times the replay. Keys are drawn from a universe of
//! 32768 ids; the byte budget holds roughly a tenth of them.

use std::hint::black_box;

use bytecache::policy::arc::ArcCache;
use bytecache::policy::fifo::FifoStore;
use bytecache::policy::lru::LruStore;
use bytecache::traits::ByteCache;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const UNIVERSE: u64 = 32_768;
const TRACE_LEN: usize = 200_000;
const VALUE_BYTES: usize = 20;
// "id:" + 5 digits = 8 key bytes per entry.
const CAPACITY: usize = (UNIVERSE as usize / 10) * (8 + VALUE_BYTES);

fn key_for(id: u64) -> String {
    format!("id:{:05}", id)
}

/// Uniform random ids.
fn random_trace(seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..TRACE_LEN)
        .map(|_| rng.random::<u64>() % UNIVERSE)
        .collect()
}

/// 90% of accesses go to a hot tenth of the universe, interleaved with
/// sequential scans over the cold part.
fn hot_scan_trace(seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hot = UNIVERSE / 10;
    let mut scan = hot;
    (0..TRACE_LEN)
        .map(|_| {
            if rng.random_bool(0.9) {
                rng.random_range(0..hot)
            } else {
                scan = if scan + 1 >= UNIVERSE { hot } else { scan + 1 };
                scan
            }
        })
        .collect()
}

/// Get-then-set-on-miss replay; returns the hit ratio.
fn replay<C: ByteCache<String, Vec<u8>>>(cache: &mut C, trace: &[u64]) -> f64 {
    for &id in trace {
        let key = key_for(id);
        if cache.get(&key).is_none() {
            cache.set(key, vec![0; VALUE_BYTES]);
        }
    }
    cache.stats().hit_ratio()
}

fn bench_hit_ratio(c: &mut Criterion) {
    let traces = [
        ("random", random_trace(0x5EED)),
        ("hot_scan", hot_scan_trace(0x5EED)),
    ];

    let mut group = c.benchmark_group("hit_ratio");
    group.sample_size(10);

    for (name, trace) in &traces {
        println!(
            "{:>9}: arc {:.4}  lru {:.4}  fifo {:.4}",
            name,
            replay(&mut ArcCache::new(CAPACITY), trace),
            replay(&mut LruStore::new(CAPACITY), trace),
            replay(&mut FifoStore::new(CAPACITY), trace),
        );

        group.bench_with_input(BenchmarkId::new("arc", name), trace, |b, trace| {
            b.iter(|| black_box(replay(&mut ArcCache::new(CAPACITY), trace)))
        });
        group.bench_with_input(BenchmarkId::new("lru", name), trace, |b, trace| {
            b.iter(|| black_box(replay(&mut LruStore::new(CAPACITY), trace)))
        });
        group.bench_with_input(BenchmarkId::new("fifo", name), trace, |b, trace| {
            b.iter(|| black_box(replay(&mut FifoStore::new(CAPACITY), trace)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_ratio);
criterion_main!(benches);
