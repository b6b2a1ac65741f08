//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and exporting are split into small traits so the
//! cache code only ever *writes* counters, while benches, tests and
//! monitoring only ever *read* them.
//!
//! ```text
//!                  ┌─────────────────────────────┐
//!                  │     CoreMetricsRecorder     │
//!                  │  get_hit/get_miss/insert    │
//!                  │  eviction/clear             │
//!                  └──────────────┬──────────────┘
//!                                 │
//!                  ┌──────────────┴──────────────┐
//!                  ▼                             ▼
//!           ┌──────────────┐             ┌──────────────┐
//!           │ StoreMetrics │             │  ArcMetrics  │
//!           │ (LRU / FIFO) │             │ + promotions │
//!           └──────────────┘             │ + ghost hits │
//!                                        │ + p moves    │
//!                                        └──────────────┘
//!
//!   MetricsSnapshotProvider<S> ──► S ──► MetricsExporter<S>
//! ```

/// Counters every byte store records.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_insert_rejected(&mut self);
    /// One entry of `bytes` bytes left the store to make room.
    fn record_evicted_entry(&mut self, bytes: usize);
    fn record_clear(&mut self);
}

/// Counters specific to the adaptive replacement cache.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_t1_to_t2_promotion(&mut self);
    fn record_b1_ghost_hit(&mut self);
    fn record_b2_ghost_hit(&mut self);
    fn record_p_increase(&mut self);
    fn record_p_decrease(&mut self);
    fn record_t1_demotion(&mut self);
    fn record_t2_demotion(&mut self);
    fn record_eviction_exhausted(&mut self);
}

/// Produces point-in-time copies of a cache's counters and gauges.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes snapshots to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
