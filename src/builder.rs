//! Unified cache builder for the byte-budgeted policies.
//!
//! Picks a policy at runtime and hands back a [`Cache`] that implements
//! [`ByteCache`] regardless of which store sits underneath.
//!
//! ## Example
//!
//! ```rust
//! use bytecache::builder::{CacheBuilder, CachePolicy};
//! use bytecache::traits::ByteCache;
//!
//! let mut cache = CacheBuilder::new(1024).build::<String, Vec<u8>>(CachePolicy::Arc);
//! cache.set("hello".to_string(), b"world".to_vec());
//! assert_eq!(cache.get(&"hello".to_string()), Some(&b"world".to_vec()));
//! assert_eq!(cache.remaining_storage(), 1014);
//! ```

use std::hash::Hash;

use crate::error::{CacheError, ConfigError};
use crate::policy::arc::ArcCache;
use crate::policy::fifo::FifoStore;
use crate::policy::lru::LruStore;
use crate::traits::{ByteCache, CacheStats};

/// Available eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// First In, First Out eviction.
    Fifo,
    /// Least Recently Used eviction.
    Lru,
    /// Adaptive Replacement Cache.
    Arc,
}

/// Cache wrapper that provides one API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Fifo(FifoStore<K, V>),
    Lru(LruStore<K, V>),
    Arc(ArcCache<K, V>),
}

impl<K, V> Cache<K, V> {
    /// The policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Fifo(_) => CachePolicy::Fifo,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Arc(_) => CachePolicy::Arc,
        }
    }

    /// The adaptive cache underneath, if the policy is [`CachePolicy::Arc`].
    pub fn as_arc(&self) -> Option<&ArcCache<K, V>> {
        match &self.inner {
            CacheInner::Arc(arc) => Some(arc),
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $cache:ident => $body:expr) => {
        match $self {
            CacheInner::Fifo($cache) => $body,
            CacheInner::Lru($cache) => $body,
            CacheInner::Arc($cache) => $body,
        }
    };
}

impl<K, V> ByteCache<K, V> for Cache<K, V>
where
    K: AsRef<[u8]> + Eq + Hash + Clone,
    V: AsRef<[u8]> + Default,
{
    fn max_storage(&self) -> usize {
        dispatch!(&self.inner, c => c.max_storage())
    }

    fn remaining_storage(&self) -> usize {
        dispatch!(&self.inner, c => c.remaining_storage())
    }

    fn used_storage(&self) -> usize {
        dispatch!(&self.inner, c => c.used_storage())
    }

    fn peek(&self, key: &K) -> Option<&V> {
        dispatch!(&self.inner, c => c.peek(key))
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        dispatch!(&mut self.inner, c => c.get(key))
    }

    fn try_set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        dispatch!(&mut self.inner, c => c.try_set(key, value))
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        dispatch!(&mut self.inner, c => c.remove(key))
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, c => c.len())
    }

    fn stats(&self) -> CacheStats {
        dispatch!(&self.inner, c => c.stats())
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, c => c.clear())
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: usize,
    initial_target: Option<usize>,
}

impl CacheBuilder {
    /// Create a new cache builder with a byte budget of `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            initial_target: None,
        }
    }

    /// Initial T1 target `p` for [`CachePolicy::Arc`]. Ignored by other policies.
    pub fn initial_target(mut self, p: usize) -> Self {
        self.initial_target = Some(p);
        self
    }

    /// Build a cache with the specified policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the ARC initial target exceeds the capacity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bytecache::builder::{CacheBuilder, CachePolicy};
    ///
    /// let ok = CacheBuilder::new(64)
    ///     .initial_target(32)
    ///     .try_build::<String, Vec<u8>>(CachePolicy::Arc);
    /// assert!(ok.is_ok());
    ///
    /// let err = CacheBuilder::new(64)
    ///     .initial_target(65)
    ///     .try_build::<String, Vec<u8>>(CachePolicy::Arc);
    /// assert!(err.is_err());
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: AsRef<[u8]> + Eq + Hash + Clone,
        V: AsRef<[u8]> + Default,
    {
        let inner = match policy {
            CachePolicy::Fifo => CacheInner::Fifo(FifoStore::new(self.capacity)),
            CachePolicy::Lru => CacheInner::Lru(LruStore::new(self.capacity)),
            CachePolicy::Arc => CacheInner::Arc(ArcCache::try_with_target(
                self.capacity,
                self.initial_target.unwrap_or(0),
            )?),
        };
        Ok(Cache { inner })
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. Use
    /// [`try_build`](Self::try_build) for a fallible version.
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: AsRef<[u8]> + Eq + Hash + Clone,
        V: AsRef<[u8]> + Default,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }
}
