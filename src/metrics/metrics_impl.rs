use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder};

// ---------------------------------------------------------------------------
// StoreMetrics
// ---------------------------------------------------------------------------

/// Counters recorded by `LruStore` and `FifoStore`.
#[derive(Debug, Default, Clone)]
pub struct StoreMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub evicted_entries: u64,
    pub evicted_bytes: u64,
    pub clears: u64,
}

impl CoreMetricsRecorder for StoreMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }
    fn record_evicted_entry(&mut self, bytes: usize) {
        self.evicted_entries += 1;
        self.evicted_bytes += bytes as u64;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

// ---------------------------------------------------------------------------
// ArcMetrics
// ---------------------------------------------------------------------------

/// Counters recorded by `ArcCache` on top of the per-list store metrics.
#[derive(Debug, Default, Clone)]
pub struct ArcMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub insert_rejected: u64,
    pub evicted_entries: u64,
    pub evicted_bytes: u64,
    pub clears: u64,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub p_increases: u64,
    pub p_decreases: u64,
    pub t1_demotions: u64,
    pub t2_demotions: u64,
    pub evictions_exhausted: u64,
}

impl CoreMetricsRecorder for ArcMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }
    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }
    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }
    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }
    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }
    fn record_insert_rejected(&mut self) {
        self.insert_rejected += 1;
    }
    fn record_evicted_entry(&mut self, bytes: usize) {
        self.evicted_entries += 1;
        self.evicted_bytes += bytes as u64;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for ArcMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }
    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }
    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }
    fn record_p_increase(&mut self) {
        self.p_increases += 1;
    }
    fn record_p_decrease(&mut self) {
        self.p_decreases += 1;
    }
    fn record_t1_demotion(&mut self) {
        self.t1_demotions += 1;
    }
    fn record_t2_demotion(&mut self) {
        self.t2_demotions += 1;
    }
    fn record_eviction_exhausted(&mut self) {
        self.evictions_exhausted += 1;
    }
}
