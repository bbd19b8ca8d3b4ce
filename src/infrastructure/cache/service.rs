//! Cache service trait and error types.

use async_trait::async_trait;
use std::collections::BTreeSet;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// A cached occupied-car set for the current generation.
    Hit(BTreeSet<i64>),
    /// No entry. A fresh value must be stored under `generation`, the one
    /// observed by this lookup, so an invalidation racing the recomputation
    /// leaves the write unreachable.
    Miss { generation: u64 },
    /// The backend could not pin a generation; the value must not be stored.
    Unavailable,
}

/// Cache of occupied-car sets keyed by rule set and date.
///
/// Entries are never updated in place. Any reservation change calls
/// [`CacheService::invalidate_all`], which makes every existing entry
/// unreachable at once.
///
/// Implementations must be thread-safe and fail open: a backend failure
/// degrades to a cache miss, never to a request error.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the occupied-car ids for `key` in the current generation.
    async fn get_occupied(&self, key: &str) -> CacheResult<CacheLookup>;

    /// Stores the occupied-car ids for `key` under `generation`.
    ///
    /// `generation` must come from the [`CacheLookup::Miss`] that triggered the
    /// recomputation. `ttl_seconds = None` uses the implementation default.
    async fn set_occupied(
        &self,
        generation: u64,
        key: &str,
        car_ids: &BTreeSet<i64>,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Drops every cached entry.
    async fn invalidate_all(&self) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
