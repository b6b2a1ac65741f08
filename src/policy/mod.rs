//! Eviction policies.
//!
//! - [`lru`]: recency-ordered store, also the list type inside ARC
//! - [`arc`]: adaptive replacement over four LRU stores
//! - [`fifo`]: insertion-ordered store

pub mod arc;
pub mod fifo;
pub mod lru;
