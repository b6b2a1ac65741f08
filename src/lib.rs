//! bytecache: byte-budgeted caches with FIFO, LRU and adaptive (ARC) eviction.
//!
//! Every cache charges an entry `len(key) + len(value)` bytes against a fixed
//! budget. [`policy::arc::ArcCache`] is built from four [`policy::lru::LruStore`]
//! lists and adapts its recency/frequency split to the workload.
//!
//! See `DESIGN.md` for the module map and the eviction rules.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

#[cfg(feature = "concurrency")]
pub mod concurrent;

#[cfg(feature = "metrics")]
pub mod metrics;
