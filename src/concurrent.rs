//! Thread-safe wrapper for any [`ByteCache`] (feature `concurrency`).
//!
//! Every cache operation touches more than one internal list, so the whole
//! cache sits behind a single `parking_lot::Mutex`. A read lock would not help:
//! `get` reorders and counts stats.
//!
//! Values are returned by clone because a reference cannot outlive the guard.
//! Use [`ConcurrentByteCache::with_lock`] to borrow values in place.

use std::marker::PhantomData;

use parking_lot::Mutex;

use crate::error::CacheError;
use crate::traits::{ByteCache, CacheStats};

/// A [`ByteCache`] shared across threads behind one exclusive lock.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use bytecache::concurrent::ConcurrentByteCache;
/// use bytecache::policy::arc::ArcCache;
///
/// let cache: Arc<ConcurrentByteCache<String, Vec<u8>, _>> =
///     Arc::new(ConcurrentByteCache::new(ArcCache::new(1024)));
///
/// let writer = {
///     let cache = Arc::clone(&cache);
///     thread::spawn(move || cache.set("k".to_string(), b"v".to_vec()))
/// };
/// assert!(writer.join().unwrap());
/// assert_eq!(cache.get(&"k".to_string()), Some(b"v".to_vec()));
/// ```
#[derive(Debug)]
pub struct ConcurrentByteCache<K, V, C> {
    inner: Mutex<C>,
    _marker: PhantomData<fn(K) -> V>,
}

impl<K, V, C> ConcurrentByteCache<K, V, C>
where
    C: ByteCache<K, V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            inner: Mutex::new(cache),
            _marker: PhantomData,
        }
    }

    /// Runs `f` with exclusive access to the wrapped cache.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    pub fn into_inner(self) -> C {
        self.inner.into_inner()
    }

    pub fn max_storage(&self) -> usize {
        self.inner.lock().max_storage()
    }

    pub fn remaining_storage(&self) -> usize {
        self.inner.lock().remaining_storage()
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn try_set(&self, key: K, value: V) -> Result<(), CacheError> {
        self.inner.lock().try_set(key, value)
    }

    pub fn set(&self, key: K, value: V) -> bool {
        self.inner.lock().set(key, value)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}
