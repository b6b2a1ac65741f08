//! Byte-budgeted First In, First Out store.
//!
//! Evicts in insertion order. Reads never reorder, and overwriting a key keeps
//! its original insertion slot.
//!
//! ```text
//!   newest ─► [d] ◄──► [c] ◄──► [b] ◄──► [a] ◄─ oldest (next victim)
//! ```
//!
//! Removal of an arbitrary key is O(1): the key index points straight at the
//! list node.

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

/// First In, First Out store with a byte budget.
///
/// # Example
///
/// ```
/// use bytecache::policy::fifo::FifoStore;
/// use bytecache::traits::ByteCache;
///
/// let mut fifo: FifoStore<String, Vec<u8>> = FifoStore::new(8);
/// fifo.set("a".into(), b"111".to_vec());
/// fifo.set("b".into(), b"222".to_vec());
///
/// // Reading "a" does not save it: it is still the oldest.
/// fifo.get(&"a".to_string());
/// fifo.set("c".into(), b"333".to_vec());
///
/// assert!(fifo.peek(&"a".to_string()).is_none());
/// assert_eq!(fifo.len(), 2);
/// ```
#[derive(Debug)]
pub struct FifoStore<K, V> {
    map: FxHashMap<K, SlotId>,
    queue: IntrusiveList<Entry<K, V>>,
    capacity: usize,
    used: usize,
    stats: CacheStats,
    #[cfg(feature = "metrics")]
    metrics: StoreMetrics,
}

impl<K, V> FifoStore<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]>,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            map: FxHashMap::default(),
            queue: IntrusiveList::new(),
            capacity,
            used: 0,
            stats: CacheStats::default(),
            #[cfg(feature = "metrics")]
            metrics: StoreMetrics::default(),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Keys from newest to oldest.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.queue.iter().map(|entry| &entry.key)
    }

    /// Oldest binding, next in line for eviction.
    pub fn peek_oldest(&self) -> Option<(&K, &V)> {
        self.queue.back().map(|entry| (&entry.key, &entry.value))
    }

    fn evict_oldest(&mut self, keep: Option<SlotId>) -> bool {
        let Some(victim) = self.queue.back_id_except(keep) else {
            return false;
        };
        let Some(entry) = self.queue.remove(victim) else {
            return false;
        };
        self.map.remove(&entry.key);
        self.used -= entry.size;
        trace!(bytes = entry.size, used = self.used, "fifo evicted oldest entry");
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry(entry.size);
        true
    }

    fn make_room(
        &mut self,
        needed: usize,
        released: usize,
        keep: Option<SlotId>,
    ) -> Result<(), CacheError> {
        while needed > self.capacity - (self.used - released) {
            if !self.evict_oldest(keep) {
                warn!(
                    needed,
                    used = self.used,
                    capacity = self.capacity,
                    "fifo ran out of entries to evict"
                );
                return Err(CacheError::EvictionExhausted);
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.queue.debug_validate_invariants();
        assert_eq!(self.map.len(), self.queue.len());
        assert!(self.used <= self.capacity);
        let total: usize = self.queue.iter().map(|entry| entry.size).sum();
        assert_eq!(total, self.used);
        for entry in self.queue.iter() {
            assert!(self.map.contains_key(&entry.key));
        }
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> StoreMetricsSnapshot {
        StoreMetricsSnapshot::from_counters(
            &self.metrics,
            self.queue.len(),
            self.used,
            self.capacity,
        )
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<StoreMetricsSnapshot> for FifoStore<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]>,
{
    fn snapshot(&self) -> StoreMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> ByteCache<K, V> for FifoStore<K, V>
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
        self.queue.get(id).map(|entry| &entry.value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        match self.map.get(key) {
            Some(&id) => {
                self.stats.record_hit();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_hit();
                self.queue.get(id).map(|entry| &entry.value)
            },
            None => {
                self.stats.record_miss();
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                None
            },
        }
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
            let old = self.queue.get(id).map_or(0, |entry| entry.size);
            self.make_room(size, old, Some(id))?;
            if let Some(entry) = self.queue.get_mut(id) {
                entry.value = value;
                entry.size = size;
            }
            self.used = self.used - old + size;
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return Ok(());
        }

        self.make_room(size, 0, None)?;
        let id = self.queue.push_front(Entry {
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
        let id = self.map.remove(key)?;
        let entry = self.queue.remove(id)?;
        self.used -= entry.size;
        Some(entry.value)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats
    }

    fn clear(&mut self) {
        self.map.clear();
        self.queue.clear();
        self.used = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();
    }
}
