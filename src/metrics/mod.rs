//! Optional counters and exporters (feature `metrics`).
//!
//! Stores record into [`StoreMetrics`], the adaptive cache into
//! [`ArcMetrics`]. Call `metrics_snapshot()` on a cache to copy the counters
//! together with its current gauges, then hand the snapshot to an exporter.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::{ArcMetrics, StoreMetrics};
pub use snapshot::{ArcMetricsSnapshot, StoreMetricsSnapshot};
pub use traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsExporter, MetricsSnapshotProvider};
