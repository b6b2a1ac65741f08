//! DHAT heap profiler for bytecache.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use bytecache::policy::arc::ArcCache;
use bytecache::policy::fifo::FifoStore;
use bytecache::policy::lru::LruStore;
use bytecache::traits::ByteCache;

const CAPACITY_BYTES: usize = 256 * 1024;
const OPERATIONS: usize = 100_000;
const UNIVERSE: u64 = 16_384;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

fn key_for(id: u64) -> String {
    format!("key:{:08}", id)
}

/// Values vary between 8 and 71 bytes so eviction counts differ per insert.
fn value_for(id: u64) -> Vec<u8> {
    vec![id as u8; 8 + (id % 64) as usize]
}

/// Run a hotset workload: 90% of accesses hit 10% of keys.
fn hotset_workload<C: ByteCache<String, Vec<u8>>>(cache: &mut C, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = UNIVERSE / 10;

    for _ in 0..OPERATIONS {
        let id = if rng.next_f64() < 0.9 {
            rng.next_u64() % hot_size
        } else {
            hot_size + (rng.next_u64() % (UNIVERSE - hot_size))
        };
        let key = key_for(id);
        if cache.get(&key).is_none() {
            cache.set(key, value_for(id));
        }
    }
}

/// Run a scan workload: sequential access pattern.
fn scan_workload<C: ByteCache<String, Vec<u8>>>(cache: &mut C) {
    for i in 0..OPERATIONS / 2 {
        let id = (i as u64) % UNIVERSE;
        let key = key_for(id);
        if cache.get(&key).is_none() {
            cache.set(key, value_for(id));
        }
    }
}

/// Run eviction churn: insert far more bytes than the budget holds.
fn eviction_churn<C: ByteCache<String, Vec<u8>>>(cache: &mut C) {
    for i in 0..OPERATIONS / 4 {
        let id = UNIVERSE + i as u64;
        cache.set(key_for(id), value_for(id));
    }
}

fn profile<C: ByteCache<String, Vec<u8>>>(name: &str, cache: &mut C) {
    println!("=== Profiling {} ===", name);

    hotset_workload(cache, 42);
    scan_workload(cache);
    eviction_churn(cache);

    let stats = cache.stats();
    println!("  Final size: {} entries", cache.len());
    println!(
        "  Used: {} / {} bytes",
        cache.used_storage(),
        cache.max_storage()
    );
    println!("  Hit ratio: {:.3}", stats.hit_ratio());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("bytecache DHAT Heap Profiling");
    println!("=============================\n");

    profile("LRU", &mut LruStore::new(CAPACITY_BYTES));
    profile("FIFO", &mut FifoStore::new(CAPACITY_BYTES));

    let mut arc = ArcCache::new(CAPACITY_BYTES);
    profile("ARC", &mut arc);
    println!(
        "  p = {} bytes, ghosts: b1 = {}, b2 = {}",
        arc.p_value(),
        arc.b1_len(),
        arc.b2_len()
    );

    println!("\n=============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
