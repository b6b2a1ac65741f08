//! Byte-budgeted Least Recently Used store.
//!
//! [`LruStore`] keeps bindings in recency order and evicts from the least
//! recently used end until a new binding fits. It is used directly as a cache
//! and as the building block for the four lists of
//! [`ArcCache`](crate::policy::arc::ArcCache).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                          LruStore<K, V>                              │
//! │                                                                      │
//! │   map: FxHashMap<K, SlotId>        list: IntrusiveList<Entry<K, V>>  │
//! │   ┌────────┬────────┐                                                │
//! │   │ "b"    │ id_1   │──────►  head ─► [b|..|4] ◄──► [a|..|7] ◄── tail │
//! │   │ "a"    │ id_0   │──────────────────────────────────┘             │
//! │   └────────┴────────┘                 MRU                LRU         │
//! │                                                                      │
//! │   used = Σ entry.size          capacity = byte budget                │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation  | Reorders | Stats | Notes                                  |
//! |------------|----------|-------|----------------------------------------|
//! | `peek`     | no       | no    |                                        |
//! | `get`      | yes      | yes   | hit moves the binding to the MRU end   |
//! | `try_set`  | new only | no    | overwrite keeps the binding's position |
//! | `remove`   | n/a      | no    | O(1) unlink                            |
//! | `pop_lru`  | n/a      | no    | used by the adaptive cache             |
//!
//! ## Overwrites
//!
//! Overwriting a key re-accounts its size. When the new value is larger, other
//! bindings are evicted from the LRU end; the binding being updated is never
//! chosen as its own victim.

use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::ds::{IntrusiveList, SlotId};
use crate::error::CacheError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::StoreMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::StoreMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{ByteCache, CacheStats, entry_size};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    size: usize,
}

/// Least Recently Used store with a byte budget.
///
/// # Example
///
/// ```
/// use bytecache::policy::lru::LruStore;
/// use bytecache::traits::ByteCache;
///
/// let mut lru: LruStore<String, Vec<u8>> = LruStore::new(12);
/// lru.set("a".into(), b"11111".to_vec()); // 6 bytes
/// lru.set("b".into(), b"22222".to_vec()); // 6 bytes
///
/// // Touch "a" so "b" becomes the eviction candidate.
/// lru.get(&"a".to_string());
/// lru.set("c".into(), b"3".to_vec());
///
/// assert!(lru.peek(&"a".to_string()).is_some());
/// assert!(lru.peek(&"b".to_string()).is_none());
/// assert_eq!(lru.remaining_storage(), 4);
/// ```
#[derive(Debug)]
pub struct LruStore<K, V> {
    map: FxHashMap<K, SlotId>,
    list: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    used: usize,
    stats: CacheStats,
    #[cfg(feature = "metrics")]
    metrics: StoreMetrics,
}

impl<K, V> LruStore<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]>,
{
    /// Creates an empty store holding at most `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            list: IntrusiveList::new(),
            capacity,
            used: 0,
            stats: CacheStats::default(),
            #[cfg(feature = "metrics")]
            metrics: StoreMetrics::default(),
        }
    }

    /// Returns `true` if `key` is resident. Does not count as a use.
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Size in bytes of the binding for `key`, if resident.
    pub fn entry_bytes(&self, key: &K) -> Option<usize> {
        let id = *self.map.get(key)?;
        self.list.get(id).map(|entry| entry.size)
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|entry| &entry.key)
    }

    /// Least recently used binding, without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Removes and returns the least recently used binding.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.map.remove(&entry.key);
        self.used -= entry.size;
        Some((entry.key, entry.value))
    }

    /// Evicts the least recently used binding and returns its key.
    pub fn evict(&mut self) -> Option<K> {
        self.evict_except(None).map(|entry| entry.key)
    }

    /// Removes a binding and hands back both key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let id = self.map.remove(key)?;
        let entry = self.list.remove(id)?;
        self.used -= entry.size;
        Some((entry.key, entry.value))
    }

    /// Evicts the LRU binding, skipping `keep` if it happens to be the tail.
    fn evict_except(&mut self, keep: Option<SlotId>) -> Option<Entry<K, V>> {
        let victim = self.list.back_id_except(keep)?;
        let entry = self.list.remove(victim)?;
        self.map.remove(&entry.key);
        self.used -= entry.size;
        trace!(
            bytes = entry.size,
            used = self.used,
            capacity = self.capacity,
            "lru evicted tail entry"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry(entry.size);
        Some(entry)
    }

    /// Evicts until `needed` more bytes fit next to `used - released`.
    fn make_room(
        &mut self,
        needed: usize,
        released: usize,
        keep: Option<SlotId>,
    ) -> Result<(), CacheError> {
        while needed > self.capacity - (self.used - released) {
            if self.evict_except(keep).is_none() {
                warn!(
                    needed,
                    used = self.used,
                    capacity = self.capacity,
                    "lru ran out of entries to evict"
                );
                return Err(CacheError::EvictionExhausted);
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.map.len(), self.list.len());
        assert!(
            self.used <= self.capacity,
            "used ({}) exceeds capacity ({})",
            self.used,
            self.capacity
        );

        let mut total = 0usize;
        for entry in self.list.iter() {
            assert_eq!(entry.size, entry_size(&entry.key, &entry.value));
            let id = self.map.get(&entry.key).expect("listed key missing from map");
            assert!(self.list.contains(*id));
            total += entry.size;
        }
        assert_eq!(total, self.used, "used does not match summed entry sizes");
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot::from_counters(
            &self.metrics,
            self.list.len(),
            self.used,
            self.capacity,
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<StoreMetricsSnapshot> for LruStore<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]>,
{
    fn snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> ByteCache<K, V> for LruStore<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]>,
{
    fn max_storage(&self) -> usize {
        self.capacity
    }

    fn remaining_storage(&self) -> usize {
        self.capacity - self.used
    }

    fn used_storage(&self) -> usize {
        self.used
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            self.stats.record_miss();
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        self.list.move_to_front(id);
        self.stats.record_hit();
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.list.get(id).map(|entry| &entry.value)
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

        if let Some(&id) = self.map.get(&key) {
            let old = self.list.get(id).map_or(0, |entry| entry.size);
            self.make_room(size, old, Some(id))?;
            if let Some(entry) = self.list.get_mut(id) {
                entry.value = value;
                entry.size = size;
            }
            self.used = self.used - old + size;
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Ok(());
        }

        self.make_room(size, 0, None)?;
        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
            size,
        });
        self.map.insert(key, id);
        self.used += size;
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();
        Ok(())
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.used = 0;
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
        Evict,
    }

    fn operation_strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            4 => (0u8..32, 0usize..24).prop_map(|(k, n)| Operation::Set(k, n)),
            2 => (0u8..32).prop_map(Operation::Get),
            1 => (0u8..32).prop_map(Operation::Peek),
            1 => (0u8..32).prop_map(Operation::Remove),
            1 => Just(Operation::Evict),
        ]
    }

    proptest! {
        /// Used bytes stay within capacity and match the summed entry sizes.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_arbitrary_ops_maintain_invariants(
            capacity in 0usize..96,
            ops in prop::collection::vec(operation_strategy(), 0..200)
        ) {
            let mut lru: LruStore<String, Vec<u8>> = LruStore::new(capacity);
            for op in ops {
                match op {
                    Operation::Set(k, n) => {
                        let key = format!("k{}", k);
                        let fits = key.len() + n <= capacity;
                        prop_assert_eq!(lru.set(key.clone(), vec![k; n]), fits);
                        if fits {
                            prop_assert_eq!(lru.peek(&key), Some(&vec![k; n]));
                        }
                    }
                    Operation::Get(k) => { lru.get(&format!("k{}", k)); }
                    Operation::Peek(k) => { lru.peek(&format!("k{}", k)); }
                    Operation::Remove(k) => {
                        let key = format!("k{}", k);
                        lru.remove(&key);
                        prop_assert!(!lru.contains(&key));
                    }
                    Operation::Evict => {
                        let tail = lru.peek_lru().map(|(k, _)| k.clone());
                        prop_assert_eq!(lru.evict(), tail);
                    }
                }
                prop_assert!(lru.used_storage() <= lru.max_storage());
                lru.debug_validate_invariants();
            }
        }

        /// Each get is counted exactly once as a hit or a miss.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_stats_count_every_get(
            keys in prop::collection::vec(0u8..16, 0..100)
        ) {
            let mut lru: LruStore<String, Vec<u8>> = LruStore::new(48);
            let mut gets = 0u64;
            for k in keys {
                if k % 2 == 0 {
                    lru.set(format!("k{}", k), vec![k]);
                } else {
                    lru.get(&format!("k{}", k - 1));
                    gets += 1;
                }
            }
            prop_assert_eq!(lru.stats().lookups(), gets);
        }
    }
}
