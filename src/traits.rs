//! # Byte-Accounted Cache Interface
//!
//! Every cache in this crate budgets storage in **bytes**, not entries: an
//! entry costs `len(key) + len(value)`. This module defines the shared
//! operation set ([`ByteCache`]), the cumulative hit/miss record
//! ([`CacheStats`]), and the sizing helper ([`entry_size`]).
//!
//! ## Architecture
//!
//! ```text
//!                     ┌───────────────────────────────────────┐
//!                     │            ByteCache<K, V>            │
//!                     │                                       │
//!                     │  max_storage / remaining_storage      │
//!                     │  peek(&K)  → Option<&V>   (no reorder)│
//!                     │  get(&K)   → Option<&V>   (stats)     │
//!                     │  try_set(K, V) → Result<(), CacheError│
//!                     │  set(K, V) → bool                     │
//!                     │  remove(&K) → Option<V>               │
//!                     │  len / stats / clear                  │
//!                     └───────────────────┬───────────────────┘
//!                                         │
//!            ┌────────────────────────────┼────────────────────────────┐
//!            ▼                            ▼                            ▼
//!   ┌─────────────────┐         ┌──────────────────┐         ┌──────────────────┐
//!   │  FifoStore      │         │  LruStore        │         │  ArcCache        │
//!   │  insertion order│         │  recency order   │◄────────│  T1 T2 B1 B2     │
//!   └─────────────────┘         └──────────────────┘  x4     └──────────────────┘
//! ```
//!
//! ## Sizing
//!
//! | Key            | Value         | Size      |
//! |----------------|---------------|-----------|
//! | `"key"`        | `b"old"`      | 6 bytes   |
//! | `""`           | `b"Value"`    | 5 bytes   |
//! | `"key"`        | `b""`         | 3 bytes   |
//!
//! A binding with `size > capacity` is always rejected with
//! [`CacheError::OversizedEntry`] and never disturbs the cache. A zero-capacity
//! cache therefore accepts exactly one binding shape: the empty key with the
//! empty value.
//!
//! ## Thread Safety
//!
//! None of the caches synchronize internally. Wrap them in
//! `ConcurrentByteCache` (feature `concurrency`) or another single exclusive
//! lock when sharing across threads.

use crate::error::CacheError;

/// Returns the number of bytes a binding occupies: `len(key) + len(value)`.
///
/// # Example
///
/// ```
/// use bytecache::traits::entry_size;
///
/// assert_eq!(entry_size("key", b"old"), 6);
/// assert_eq!(entry_size("", b""), 0);
/// ```
#[inline]
pub fn entry_size<K, V>(key: &K, value: &V) -> usize
where
    K: AsRef<[u8]> + ?Sized,
    V: AsRef<[u8]> + ?Sized,
{
    key.as_ref().len() + value.as_ref().len()
}

/// Cumulative lookup statistics since construction.
///
/// `hits`/`misses` count `get` outcomes. `b1_hits`/`b2_hits` are only
/// recorded by the adaptive cache: they count `get` calls whose key was found
/// in a ghost list. They are diagnostic and never change membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub b1_hits: u64,
    pub b2_hits: u64,
}

impl CacheStats {
    /// Total number of recorded lookups.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of lookups that hit, or `0.0` when nothing was looked up.
    pub fn hit_ratio(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }
}

/// Operations shared by every byte-budgeted cache.
///
/// # Example
///
/// ```
/// use bytecache::policy::lru::LruStore;
/// use bytecache::traits::ByteCache;
///
/// fn warm<C: ByteCache<String, Vec<u8>>>(cache: &mut C, data: &[(&str, &str)]) -> usize {
///     let mut stored = 0;
///     for (key, value) in data {
///         if cache.set(key.to_string(), value.as_bytes().to_vec()) {
///             stored += 1;
///         }
///     }
///     stored
/// }
///
/// let mut cache = LruStore::new(1024);
/// assert_eq!(warm(&mut cache, &[("a", "1"), ("b", "2")]), 2);
/// assert_eq!(cache.remaining_storage(), 1020);
/// ```
pub trait ByteCache<K, V> {
    /// Total byte budget.
    fn max_storage(&self) -> usize;

    /// Bytes still available: `max_storage() - used_storage()`.
    fn remaining_storage(&self) -> usize;

    /// Bytes held by resident entries.
    fn used_storage(&self) -> usize {
        self.max_storage() - self.remaining_storage()
    }

    /// Reads a value without counting a use: no reordering, no stats.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Reads a value and counts a use (hit or miss in [`stats`](Self::stats)).
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Stores a binding, evicting others as the policy dictates.
    ///
    /// # Errors
    ///
    /// - [`CacheError::OversizedEntry`] if `len(key) + len(value)` exceeds
    ///   [`max_storage`](Self::max_storage); nothing is modified.
    /// - [`CacheError::EvictionExhausted`] if accounting demanded more space
    ///   than could be freed.
    fn try_set(&mut self, key: K, value: V) -> Result<(), CacheError>;

    /// Stores a binding, returning `true` on success.
    ///
    /// `false` exactly when [`try_set`](Self::try_set) would return an error.
    fn set(&mut self, key: K, value: V) -> bool {
        self.try_set(key, value).is_ok()
    }

    /// Removes a binding, returning its value.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Number of resident bindings.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cumulative statistics; not reset by [`clear`](Self::clear).
    fn stats(&self) -> CacheStats;

    /// Drops every binding. Statistics are kept.
    fn clear(&mut self);
}
