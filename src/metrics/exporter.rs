use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{ArcMetricsSnapshot, StoreMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to a collector. Write errors are ignored: metrics
/// are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_sample(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_sample("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: usize) {
        self.write_sample("gauge", suffix, value as u64);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_core(
        &self,
        get_calls: u64,
        get_hits: u64,
        get_misses: u64,
        insert_calls: u64,
        insert_new: u64,
        insert_updates: u64,
        insert_rejected: u64,
        evicted_entries: u64,
        evicted_bytes: u64,
        clears: u64,
    ) {
        self.write_counter("get_calls_total", get_calls);
        self.write_counter("get_hits_total", get_hits);
        self.write_counter("get_misses_total", get_misses);
        self.write_counter("insert_calls_total", insert_calls);
        self.write_counter("insert_new_total", insert_new);
        self.write_counter("insert_updates_total", insert_updates);
        self.write_counter("insert_rejected_total", insert_rejected);
        self.write_counter("evicted_entries_total", evicted_entries);
        self.write_counter("evicted_bytes_total", evicted_bytes);
        self.write_counter("clears_total", clears);
    }
}

impl<W: Write + Send + Sync> MetricsExporter<StoreMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &StoreMetricsSnapshot) {
        self.write_core(
            snapshot.get_calls,
            snapshot.get_hits,
            snapshot.get_misses,
            snapshot.insert_calls,
            snapshot.insert_new,
            snapshot.insert_updates,
            snapshot.insert_rejected,
            snapshot.evicted_entries,
            snapshot.evicted_bytes,
            snapshot.clears,
        );
        self.write_gauge("cache_len", snapshot.len);
        self.write_gauge("used_bytes", snapshot.used_bytes);
        self.write_gauge("capacity_bytes", snapshot.capacity);
    }
}

impl<W: Write + Send + Sync> MetricsExporter<ArcMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ArcMetricsSnapshot) {
        self.write_core(
            snapshot.get_calls,
            snapshot.get_hits,
            snapshot.get_misses,
            snapshot.insert_calls,
            snapshot.insert_new,
            snapshot.insert_updates,
            snapshot.insert_rejected,
            snapshot.evicted_entries,
            snapshot.evicted_bytes,
            snapshot.clears,
        );
        self.write_counter("t1_to_t2_promotions_total", snapshot.t1_to_t2_promotions);
        self.write_counter("b1_ghost_hits_total", snapshot.b1_ghost_hits);
        self.write_counter("b2_ghost_hits_total", snapshot.b2_ghost_hits);
        self.write_counter("p_increases_total", snapshot.p_increases);
        self.write_counter("p_decreases_total", snapshot.p_decreases);
        self.write_counter("t1_demotions_total", snapshot.t1_demotions);
        self.write_counter("t2_demotions_total", snapshot.t2_demotions);
        self.write_counter("evictions_exhausted_total", snapshot.evictions_exhausted);
        self.write_gauge("cache_len", snapshot.len);
        self.write_gauge("used_bytes", snapshot.used_bytes);
        self.write_gauge("capacity_bytes", snapshot.capacity);
        self.write_gauge("target_t1_bytes", snapshot.p);
        self.write_gauge("t1_bytes", snapshot.t1_bytes);
        self.write_gauge("t2_bytes", snapshot.t2_bytes);
        self.write_gauge("b1_bytes", snapshot.b1_bytes);
        self.write_gauge("b2_bytes", snapshot.b2_bytes);
    }
}
