//! Byte-budgeted Adaptive Replacement Cache (ARC).
//!
//! Balances recency against frequency by splitting the resident byte budget
//! between two LRU lists and remembering recently evicted keys in two ghost
//! lists. Ghost hits move the target size `p` of the recency list, so the
//! partition follows the workload.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                            ArcCache<K, V>                                │
//! │                                                                          │
//! │   capacity (bytes)        p = target bytes for T1, 0 ≤ p ≤ capacity      │
//! │                                                                          │
//! │   Resident (count toward used)         Ghost (keys only, placeholder V)  │
//! │   ┌──────────────────────────────┐     ┌──────────────────────────────┐  │
//! │   │ T1: LruStore  seen once      │────►│ B1: LruStore  evicted from T1│  │
//! │   │ MRU [c] ◄─► [a] LRU          │     │ MRU [x] ◄─► [y] LRU          │  │
//! │   └──────────────┬───────────────┘     └───────────────┬──────────────┘  │
//! │                  │ reuse                     ghost hit │ (p grows)       │
//! │                  ▼                                     ▼                 │
//! │   ┌──────────────────────────────┐     ┌──────────────────────────────┐  │
//! │   │ T2: LruStore  seen twice+    │────►│ B2: LruStore  evicted from T2│  │
//! │   │ MRU [b] ◄─► [d] LRU          │     │ MRU [z] LRU                  │  │
//! │   └──────────────────────────────┘     └──────────────┬───────────────┘  │
//! │                  ▲                          ghost hit │ (p shrinks)      │
//! │                  └────────────────────────────────────┘                  │
//! │                                                                          │
//! │   used = bytes(T1) + bytes(T2) ≤ capacity                                │
//! │   each key lives in at most one of T1, T2, B1, B2                        │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Set Flow
//!
//! ```text
//!   set(key, value), size = len(key) + len(value):
//!     size > capacity      → OversizedEntry, nothing changes
//!     key in T1            → unlink from T1, make room, insert into T2
//!     key in T2            → update in place (re-insert at MRU if it grows)
//!     key in B1            → p += delta, make room, B1 → T2
//!     key in B2            → p -= delta, make room, B2 → T2
//!     cold miss            → prune ghosts, make room, insert into T1
//!
//!   delta = max(1, bytes(B2) / bytes(B1)), or 1 when B1 is empty
//! ```
//!
//! ## Replace
//!
//! Each `replace` call demotes exactly one resident entry to its ghost list:
//!
//! ```text
//!   if bytes(T1) > 0 and (bytes(T1) > p or (bytes(T1) == p and key ∈ B1)):
//!       T1 tail → B1
//!   else:
//!       T2 tail → B2
//! ```
//!
//! If the chosen list is empty the other one is used; when both are empty the
//! call fails with [`CacheError::EvictionExhausted`]. "Make room" loops
//! `replace` until `capacity - used ≥ size`; every iteration removes a resident
//! entry, so the loop terminates.
//!
//! ## Cold Miss Ghost Pruning
//!
//! ```text
//!   if bytes(T1) + bytes(B1) == capacity:
//!       bytes(T1) < capacity → drop B1 tail, make room
//!       otherwise            → T1 tail → B1 directly (p not consulted)
//!   else if bytes(T1) + bytes(B1) < capacity
//!        and bytes(T1 + T2 + B1 + B2) ≥ 2 · capacity:
//!       drop B2 tail, make room
//!   make room, insert into T1
//! ```
//!
//! ## Operations
//!
//! | Operation  | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `peek`     | T1 then T2; no stats, no reordering                       |
//! | `get`      | T1 hit promotes to T2; T2 hit reorders; counts hit/miss   |
//! | `try_set`  | see Set Flow                                              |
//! | `remove`   | T1, T2, B1, B2 in order; ghost removal yields placeholder |
//! | `clear`    | empties all four lists; keeps `p` and stats               |
//! | `len`      | resident entries (T1 + T2)                                |
//!
//! `get` also counts `b1_hits`/`b2_hits` when the key is only known as a ghost.
//! Those counters are diagnostic; `get` never reinstates a ghost.
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::policy::arc::{ArcCache, ListKind};
//! use bytecache::traits::ByteCache;
//!
//! let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(30);
//! for i in 0..4 {
//!     let key = format!("____{}", i);
//!     cache.set(key.clone(), key.into_bytes()); // 10 bytes each
//! }
//!
//! // The oldest entry was demoted to the recency ghost list.
//! assert_eq!(cache.len(), 3);
//! assert_eq!(cache.location(&"____0".to_string()), Some(ListKind::B1));
//!
//! // Setting it again is a ghost hit: p grows and the key lands in T2.
//! cache.set("____0".to_string(), b"____0".to_vec());
//! assert_eq!(cache.location(&"____0".to_string()), Some(ListKind::T2));
//! assert_eq!(cache.p_value(), 1);
//! assert_eq!(cache.len(), 3);
//! ```
//!
//! ## Thread Safety
//!
//! Not synchronized. Share through `ConcurrentByteCache` (feature
//! `concurrency`) or another single lock around the whole cache.
//!
//! ## Implementation Notes
//!
//! - All four lists are [`LruStore`]s bounded at `capacity`. Ghost lists prune
//!   their own tail when a demoted key would overflow them.
//! - Ghost entries hold `V::default()`, so a ghost costs `len(key)` bytes.
//! - Initial `p` is `0` unless set through [`ArcCache::try_with_target`].
//! - The tie-break in `replace` checks whether the *incoming* key sits in B1.
//!
//! ## References
//!
//! - Megiddo & Modha, "ARC: A Self-Tuning, Low Overhead Replacement Cache",
//!   FAST 2003

use std::hash::Hash;

use tracing::{debug, trace, warn};

use crate::error::{CacheError, ConfigError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ArcMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::{ArcGauges, ArcMetricsSnapshot};
#[cfg(feature = "metrics")]
use crate::metrics::traits::{ArcMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::policy::lru::LruStore;
use crate::traits::{ByteCache, CacheStats, entry_size};

/// The list a key currently belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ListKind {
    /// Resident, seen once.
    T1,
    /// Resident, seen at least twice.
    T2,
    /// Ghost of an entry evicted from T1.
    B1,
    /// Ghost of an entry evicted from T2.
    B2,
}

/// Adaptive Replacement Cache with a byte budget.
///
/// # Example
///
/// ```
/// use bytecache::policy::arc::{ArcCache, ListKind};
/// use bytecache::traits::ByteCache;
///
/// let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(1024);
/// cache.set("key".to_string(), b"old".to_vec());
/// cache.set("key".to_string(), b"new".to_vec());
///
/// assert_eq!(cache.remaining_storage(), 1024 - 6);
/// assert_eq!(cache.get(&"key".to_string()), Some(&b"new".to_vec()));
/// assert_eq!(cache.location(&"key".to_string()), Some(ListKind::T2));
/// ```
#[derive(Debug)]
pub struct ArcCache<K, V> {
    t1: LruStore<K, V>,
    t2: LruStore<K, V>,
    b1: LruStore<K, V>,
    b2: LruStore<K, V>,
    /// Target byte size for T1.
    p: usize,
    capacity: usize,
    stats: CacheStats,
    #[cfg(feature = "metrics")]
    metrics: ArcMetrics,
}

impl<K, V> ArcCache<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]> + Default,
{
    /// Creates an empty cache holding at most `capacity` bytes, with `p = 0`.
    pub fn new(capacity: usize) -> Self {
        Self::with_target(capacity, 0)
    }

    /// Creates an empty cache with an initial T1 target.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `p > capacity`.
    pub fn try_with_target(capacity: usize, p: usize) -> Result<Self, ConfigError> {
        if p > capacity {
            return Err(ConfigError::new(format!(
                "initial target {} exceeds capacity {}",
                p, capacity
            )));
        }
        Ok(Self {
            t1: LruStore::new(capacity),
            t2: LruStore::new(capacity),
            b1: LruStore::new(capacity),
            b2: LruStore::new(capacity),
            p,
            capacity,
            stats: CacheStats::default(),
            #[cfg(feature = "metrics")]
            metrics: ArcMetrics::default(),
        })
    }

    /// Creates an empty cache with an initial T1 target.
    ///
    /// # Panics
    ///
    /// Panics if `p > capacity`. Use [`try_with_target`](Self::try_with_target)
    /// for a fallible version.
    pub fn with_target(capacity: usize, p: usize) -> Self {
        match Self::try_with_target(capacity, p) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Current target byte size for T1.
    pub fn p_value(&self) -> usize {
        self.p
    }

    pub fn t1_len(&self) -> usize {
        self.t1.len()
    }

    pub fn t2_len(&self) -> usize {
        self.t2.len()
    }

    pub fn b1_len(&self) -> usize {
        self.b1.len()
    }

    pub fn b2_len(&self) -> usize {
        self.b2.len()
    }

    pub fn t1_bytes(&self) -> usize {
        self.t1.used_storage()
    }

    pub fn t2_bytes(&self) -> usize {
        self.t2.used_storage()
    }

    pub fn b1_bytes(&self) -> usize {
        self.b1.used_storage()
    }

    pub fn b2_bytes(&self) -> usize {
        self.b2.used_storage()
    }

    /// Returns `true` if `key` is resident (T1 or T2).
    pub fn contains(&self, key: &K) -> bool {
        self.t1.contains(key) || self.t2.contains(key)
    }

    /// Which of the four lists holds `key`, if any.
    pub fn location(&self, key: &K) -> Option<ListKind> {
        if self.t1.contains(key) {
            Some(ListKind::T1)
        } else if self.t2.contains(key) {
            Some(ListKind::T2)
        } else if self.b1.contains(key) {
            Some(ListKind::B1)
        } else if self.b2.contains(key) {
            Some(ListKind::B2)
        } else {
            None
        }
    }

    #[inline]
    fn used(&self) -> usize {
        self.t1.used_storage() + self.t2.used_storage()
    }

    fn adaptation_delta(&self) -> usize {
        match self.b1.used_storage() {
            0 => 1,
            b1 => (self.b2.used_storage() / b1).max(1),
        }
    }

    /// Moves the tail of `resident` into `ghost` as a placeholder.
    ///
    /// Returns the demoted entry's size, or `None` if `resident` is empty.
    fn demote_tail(resident: &mut LruStore<K, V>, ghost: &mut LruStore<K, V>) -> Option<usize> {
        let (key, value) = resident.pop_lru()?;
        let bytes = entry_size(&key, &value);
        if let Err(err) = ghost.try_set(key, V::default()) {
            debug!(%err, "ghost list refused demoted key");
        }
        Some(bytes)
    }

    /// Demotes one resident entry to its ghost list.
    fn replace(&mut self, key: &K) -> Result<(), CacheError> {
        let key_in_b1 = self.b1.contains(key);
        let t1_bytes = self.t1.used_storage();
        let prefer_t1 = t1_bytes > 0 && (t1_bytes > self.p || (t1_bytes == self.p && key_in_b1));

        let from_t1 = match (prefer_t1, self.t1.is_empty(), self.t2.is_empty()) {
            (_, true, true) => {
                warn!(
                    used = self.used(),
                    capacity = self.capacity,
                    "arc replace found both resident lists empty"
                );
                #[cfg(feature = "metrics")]
                self.metrics.record_eviction_exhausted();
                return Err(CacheError::EvictionExhausted);
            },
            (true, false, _) | (false, false, true) => true,
            _ => false,
        };

        let bytes = if from_t1 {
            Self::demote_tail(&mut self.t1, &mut self.b1)
        } else {
            Self::demote_tail(&mut self.t2, &mut self.b2)
        };
        let Some(bytes) = bytes else {
            return Err(CacheError::EvictionExhausted);
        };

        trace!(
            from = if from_t1 { "t1" } else { "t2" },
            bytes,
            p = self.p,
            t1_bytes,
            key_in_b1,
            "arc demoted resident entry to ghost list"
        );
        #[cfg(feature = "metrics")]
        {
            self.metrics.record_evicted_entry(bytes);
            if from_t1 {
                self.metrics.record_t1_demotion();
            } else {
                self.metrics.record_t2_demotion();
            }
        }
        Ok(())
    }

    /// Runs [`replace`](Self::replace) until `size` more bytes fit.
    fn make_room(&mut self, key: &K, size: usize) -> Result<(), CacheError> {
        while self.capacity - self.used() < size {
            self.replace(key)?;
        }
        Ok(())
    }

    /// Keeps `T1 + B1` and the four-list total bounded before a cold insert.
    fn prune_for_cold_miss(&mut self, key: &K, size: usize) -> Result<(), CacheError> {
        let t1_bytes = self.t1.used_storage();
        let b1_bytes = self.b1.used_storage();

        if t1_bytes + b1_bytes == self.capacity {
            if t1_bytes < self.capacity {
                if let Some((_, _)) = self.b1.pop_lru() {
                    debug!(b1_bytes = self.b1.used_storage(), "arc pruned b1 tail");
                }
                self.make_room(key, size)?;
            } else if let Some(bytes) = Self::demote_tail(&mut self.t1, &mut self.b1) {
                trace!(bytes, "arc demoted t1 tail with b1 saturated");
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_evicted_entry(bytes);
                    self.metrics.record_t1_demotion();
                }
            }
        } else if t1_bytes + b1_bytes < self.capacity {
            let total = self.used() + b1_bytes + self.b2.used_storage();
            if total >= self.capacity.saturating_mul(2) {
                if let Some((_, _)) = self.b2.pop_lru() {
                    debug!(b2_bytes = self.b2.used_storage(), "arc pruned b2 tail");
                }
                self.make_room(key, size)?;
            }
        }
        Ok(())
    }

    /// Moves `p` after a ghost hit and returns the new value.
    fn adapt(&mut self, toward_recency: bool) -> usize {
        let delta = self.adaptation_delta();
        let before = self.p;
        self.p = if toward_recency {
            self.p.saturating_add(delta).min(self.capacity)
        } else {
            self.p.saturating_sub(delta)
        };
        trace!(
            before,
            after = self.p,
            delta,
            toward_recency,
            "arc adapted target"
        );
        #[cfg(feature = "metrics")]
        {
            if toward_recency {
                self.metrics.record_p_increase();
            } else {
                self.metrics.record_p_decrease();
            }
        }
        self.p
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.t1.debug_validate_invariants();
        self.t2.debug_validate_invariants();
        self.b1.debug_validate_invariants();
        self.b2.debug_validate_invariants();

        assert!(
            self.used() <= self.capacity,
            "resident bytes ({}) exceed capacity ({})",
            self.used(),
            self.capacity
        );
        assert!(
            self.p <= self.capacity,
            "p ({}) exceeds capacity ({})",
            self.p,
            self.capacity
        );

        for key in self.t1.keys() {
            assert!(!self.t2.contains(key), "key in both T1 and T2");
            assert!(!self.b1.contains(key), "key in both T1 and B1");
            assert!(!self.b2.contains(key), "key in both T1 and B2");
        }
        for key in self.t2.keys() {
            assert!(!self.b1.contains(key), "key in both T2 and B1");
            assert!(!self.b2.contains(key), "key in both T2 and B2");
        }
        for key in self.b1.keys() {
            assert!(!self.b2.contains(key), "key in both B1 and B2");
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> ArcMetricsSnapshot {
        ArcMetricsSnapshot::from_counters(
            &self.metrics,
            ArcGauges {
                len: self.len(),
                used_bytes: self.used(),
                capacity: self.capacity,
                p: self.p,
                t1_bytes: self.t1_bytes(),
                t2_bytes: self.t2_bytes(),
                b1_bytes: self.b1_bytes(),
                b2_bytes: self.b2_bytes(),
            },
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<ArcMetricsSnapshot> for ArcCache<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]> + Default,
{
    fn snapshot(&self) -> ArcMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> ByteCache<K, V> for ArcCache<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]> + Default,
{
    fn max_storage(&self) -> usize {
        self.capacity
    }

    fn remaining_storage(&self) -> usize {
        self.capacity - self.used()
    }

    fn used_storage(&self) -> usize {
        self.used()
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.t1.peek(key).or_else(|| self.t2.peek(key))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if let Some((owned, value)) = self.t1.remove_entry(key) {
            // T1 just released these bytes, so T2 never has to evict here.
            if let Err(err) = self.t2.try_set(owned, value) {
                warn!(%err, "arc failed to promote entry from t1 to t2");
                self.stats.record_miss();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            }
            self.stats.record_hit();
            #[cfg(feature = "metrics")]
            {
                self.metrics.record_get_hit();
                self.metrics.record_t1_to_t2_promotion();
            }
            return self.t2.peek(key);
        }

        if self.t2.get(key).is_some() {
            self.stats.record_hit();
            #[cfg(feature = "metrics")]
            self.metrics.record_get_hit();
        } else {
            self.stats.record_miss();
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            if self.b1.contains(key) {
                self.stats.b1_hits += 1;
            } else if self.b2.contains(key) {
                self.stats.b2_hits += 1;
            }
        }
        self.t2.peek(key)
    }

    fn try_set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let size = entry_size(&key, &value);
        if size > self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_rejected();
            return Err(CacheError::OversizedEntry {
                size,
                capacity: self.capacity,
            });
        }

        match self.location(&key) {
            Some(ListKind::T1) => {
                self.t1.remove(&key);
                self.make_room(&key, size)?;
                self.t2.try_set(key, value)?;
                #[cfg(feature = "metrics")]
                {
                    self.metrics.record_insert_update();
                    self.metrics.record_t1_to_t2_promotion();
                }
            },
            Some(ListKind::T2) => {
                let old = self.t2.entry_bytes(&key).unwrap_or(0);
                if size > old {
                    self.t2.remove(&key);
                    self.make_room(&key, size)?;
                }
                self.t2.try_set(key, value)?;
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
            },
            Some(ghost @ (ListKind::B1 | ListKind::B2)) => {
                let in_b1 = ghost == ListKind::B1;
                self.adapt(in_b1);
                #[cfg(feature = "metrics")]
                {
                    if in_b1 {
                        self.metrics.record_b1_ghost_hit();
                    } else {
                        self.metrics.record_b2_ghost_hit();
                    }
                }
                self.make_room(&key, size)?;
                if in_b1 {
                    self.b1.remove(&key);
                } else {
                    self.b2.remove(&key);
                }
                self.t2.try_set(key, value)?;
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
            },
            None => {
                self.prune_for_cold_miss(&key, size)?;
                self.make_room(&key, size)?;
                self.t1.try_set(key, value)?;
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_new();
            },
        }
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.t1
            .remove(key)
            .or_else(|| self.t2.remove(key))
            .or_else(|| self.b1.remove(key))
            .or_else(|| self.b2.remove(key))
    }

    fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn clear(&mut self) {
        self.t1.clear();
        self.t2.clear();
        self.b1.clear();
        self.b2.clear();
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Operation {
        Set(u8, usize),
        Get(u8),
        Peek(u8),
        Remove(u8),
        Clear,
    }

    fn operation_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            6 => (0u8..40, 0usize..20).prop_map(|(k, n)| Operation::Set(k, n)),
            3 => (0u8..40).prop_map(Operation::Get),
            1 => (0u8..40).prop_map(Operation::Peek),
            1 => (0u8..40).prop_map(Operation::Remove),
            1 => Just(Operation::Clear),
        ]
    }

    fn key_for(k: u8) -> String {
        format!("k{}", k)
    }

    proptest! {
        /// Capacity, exclusivity and accounting hold after every operation.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_arbitrary_ops_maintain_invariants(
            capacity in 0usize..120,
            initial_p in 0usize..120,
            ops in prop::collection::vec(operation_strategy(), 0..250)
        ) {
            let mut cache: ArcCache<String, Vec<u8>> =
                ArcCache::with_target(capacity, initial_p.min(capacity));
            for op in ops {
                match op {
                    Operation::Set(k, n) => {
                        let key = key_for(k);
                        let fits = key.len() + n <= capacity;
                        prop_assert_eq!(cache.set(key.clone(), vec![k; n]), fits);
                        if fits {
                            prop_assert!(cache.contains(&key));
                        }
                    }
                    Operation::Get(k) => { cache.get(&key_for(k)); }
                    Operation::Peek(k) => { cache.peek(&key_for(k)); }
                    Operation::Remove(k) => {
                        let key = key_for(k);
                        cache.remove(&key);
                        prop_assert_eq!(cache.location(&key), None);
                    }
                    Operation::Clear => cache.clear(),
                }
                prop_assert_eq!(cache.used_storage(), cache.t1_bytes() + cache.t2_bytes());
                prop_assert!(cache.used_storage() <= cache.max_storage());
                prop_assert_eq!(cache.len(), cache.t1_len() + cache.t2_len());
                cache.debug_validate_invariants();
            }
        }

        /// Set then get returns the value and leaves the key in T2.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_set_then_get_promotes(
            capacity in 8usize..120,
            prefix in prop::collection::vec((0u8..40, 0usize..20), 0..60),
            k in 0u8..40,
            n in 0usize..6
        ) {
            let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(capacity);
            for (pk, pn) in prefix {
                cache.set(key_for(pk), vec![pk; pn]);
            }
            let key = key_for(k);
            prop_assert!(cache.set(key.clone(), vec![k; n]));
            prop_assert_eq!(cache.get(&key), Some(&vec![k; n]));
            prop_assert_eq!(cache.location(&key), Some(ListKind::T2));
        }

        /// Peek never changes stats or list membership.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_peek_is_side_effect_free(
            ops in prop::collection::vec(operation_strategy(), 0..100),
            lookups in prop::collection::vec(0u8..40, 1..20)
        ) {
            let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(64);
            for op in ops {
                match op {
                    Operation::Set(k, n) => { cache.set(key_for(k), vec![k; n]); }
                    Operation::Get(k) => { cache.get(&key_for(k)); }
                    _ => {}
                }
            }
            let stats = cache.stats();
            let before: Vec<Option<ListKind>> = (0u8..40).map(|k| cache.location(&key_for(k))).collect();
            for k in lookups {
                cache.peek(&key_for(k));
            }
            let after: Vec<Option<ListKind>> = (0u8..40).map(|k| cache.location(&key_for(k))).collect();
            prop_assert_eq!(cache.stats(), stats);
            prop_assert_eq!(before, after);
        }
    }
}
