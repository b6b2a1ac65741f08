use crate::metrics::metrics_impl::{ArcMetrics, StoreMetrics};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreMetricsSnapshot {
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

    // gauges captured at snapshot time
    pub len: usize,
    pub used_bytes: usize,
    pub capacity: usize,
}

impl StoreMetricsSnapshot {
    pub(crate) fn from_counters(
        m: &StoreMetrics,
        len: usize,
        used_bytes: usize,
        capacity: usize,
    ) -> Self {
        Self {
            get_calls: m.get_calls,
            get_hits: m.get_hits,
            get_misses: m.get_misses,
            insert_calls: m.insert_calls,
            insert_new: m.insert_new,
            insert_updates: m.insert_updates,
            insert_rejected: m.insert_rejected,
            evicted_entries: m.evicted_entries,
            evicted_bytes: m.evicted_bytes,
            clears: m.clears,
            len,
            used_bytes,
            capacity,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArcMetricsSnapshot {
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

    pub len: usize,
    pub used_bytes: usize,
    pub capacity: usize,
    pub p: usize,
    pub t1_bytes: usize,
    pub t2_bytes: usize,
    pub b1_bytes: usize,
    pub b2_bytes: usize,
}

/// Gauges sampled from an `ArcCache` when a snapshot is taken.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ArcGauges {
    pub len: usize,
    pub used_bytes: usize,
    pub capacity: usize,
    pub p: usize,
    pub t1_bytes: usize,
    pub t2_bytes: usize,
    pub b1_bytes: usize,
    pub b2_bytes: usize,
}

impl ArcMetricsSnapshot {
    pub(crate) fn from_counters(m: &ArcMetrics, g: ArcGauges) -> Self {
        Self {
            get_calls: m.get_calls,
            get_hits: m.get_hits,
            get_misses: m.get_misses,
            insert_calls: m.insert_calls,
            insert_new: m.insert_new,
            insert_updates: m.insert_updates,
            insert_rejected: m.insert_rejected,
            evicted_entries: m.evicted_entries,
            evicted_bytes: m.evicted_bytes,
            clears: m.clears,
            t1_to_t2_promotions: m.t1_to_t2_promotions,
            b1_ghost_hits: m.b1_ghost_hits,
            b2_ghost_hits: m.b2_ghost_hits,
            p_increases: m.p_increases,
            p_decreases: m.p_decreases,
            t1_demotions: m.t1_demotions,
            t2_demotions: m.t2_demotions,
            evictions_exhausted: m.evictions_exhausted,
            len: g.len,
            used_bytes: g.used_bytes,
            capacity: g.capacity,
            p: g.p,
            t1_bytes: g.t1_bytes,
            t2_bytes: g.t2_bytes,
            b1_bytes: g.b1_bytes,
            b2_bytes: g.b2_bytes,
        }
    }
}
