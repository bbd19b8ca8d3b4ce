//! No-op cache implementation for testing or disabled caching.

use super::service::{CacheLookup, CacheResult, CacheService};
use async_trait::async_trait;
use std::collections::BTreeSet;
use tracing::debug;

/// A cache implementation that stores nothing.
///
/// Used when Redis is not configured or unreachable at startup. Every lookup
/// misses, so availability is computed from reservations on each request.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_occupied(&self, _key: &str) -> CacheResult<CacheLookup> {
        Ok(CacheLookup::Unavailable)
    }

    async fn set_occupied(
        &self,
        _generation: u64,
        _key: &str,
        _car_ids: &BTreeSet<i64>,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate_all(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
