pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentByteCache;
pub use crate::error::{CacheError, ConfigError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{
    ArcMetricsSnapshot, MetricsExporter, PrometheusTextExporter, StoreMetricsSnapshot,
};
pub use crate::policy::arc::{ArcCache, ListKind};
pub use crate::policy::fifo::FifoStore;
pub use crate::policy::lru::LruStore;
pub use crate::traits::{ByteCache, CacheStats, entry_size};
