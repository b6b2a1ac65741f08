//! Error types for the bytecache library.
//!
//! ## Key Components
//!
//! - [`CacheError`]: Returned by `try_set` when a binding cannot be stored
//!   (entry larger than the whole cache, or an eviction loop ran out of
//!   victims).
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. an initial ARC target larger than the capacity).
//!
//! Absent keys are not errors: lookups return `None`.
//!
//! ## Example Usage
//!
//! ```
//! use bytecache::error::CacheError;
//! use bytecache::policy::arc::ArcCache;
//! use bytecache::traits::ByteCache;
//!
//! let mut cache: ArcCache<String, Vec<u8>> = ArcCache::new(10);
//! let err = cache.try_set("123456".to_string(), b"123456".to_vec()).unwrap_err();
//! assert_eq!(err, CacheError::OversizedEntry { size: 12, capacity: 10 });
//! assert_eq!(cache.remaining_storage(), 10);
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// CacheError
// ---------------------------------------------------------------------------

/// Error returned when a binding could not be stored.
///
/// A failed `try_set` caused by [`CacheError::OversizedEntry`] leaves the
/// cache untouched. [`CacheError::EvictionExhausted`] signals broken
/// internal accounting and is logged at `warn` level where it is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// `len(key) + len(value)` exceeds the cache capacity.
    OversizedEntry { size: usize, capacity: usize },
    /// Space was still needed but no store had an entry left to evict.
    EvictionExhausted,
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::OversizedEntry { size, capacity } => write!(
                f,
                "entry of {} bytes exceeds cache capacity of {} bytes",
                size, capacity
            ),
            CacheError::EvictionExhausted => {
                f.write_str("no entry left to evict while space is still required")
            },
        }
    }
}

impl std::error::Error for CacheError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ArcCache::try_with_target`](crate::policy::arc::ArcCache::try_with_target)
/// and [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use bytecache::policy::arc::ArcCache;
///
/// let err = ArcCache::<String, Vec<u8>>::try_with_target(64, 65).unwrap_err();
/// assert!(err.to_string().contains("target"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- CacheError -------------------------------------------------------

    #[test]
    fn oversized_display_names_both_sizes() {
        let err = CacheError::OversizedEntry {
            size: 12,
            capacity: 10,
        };
        assert_eq!(
            err.to_string(),
            "entry of 12 bytes exceeds cache capacity of 10 bytes"
        );
    }

    #[test]
    fn exhausted_display() {
        let err = CacheError::EvictionExhausted;
        assert!(err.to_string().contains("no entry left to evict"));
    }

    #[test]
    fn cache_error_copy_and_eq() {
        let a = CacheError::EvictionExhausted;
        let b = a;
        assert_eq!(a, b);
        assert_ne!(
            a,
            CacheError::OversizedEntry {
                size: 1,
                capacity: 0
            }
        );
    }

    #[test]
    fn cache_error_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CacheError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("initial target exceeds capacity");
        assert_eq!(err.to_string(), "initial target exceeds capacity");
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }
}
