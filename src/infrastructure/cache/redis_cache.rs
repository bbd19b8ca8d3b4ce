//! Redis-backed cache implementation.

use super::service::{CacheError, CacheLookup, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// Redis cache for occupied-car sets.
///
/// Keys embed a generation counter stored under `{prefix}generation`.
/// Invalidation increments the counter, so stale entries are simply never read
/// again and expire through their TTL.
///
/// All operations are fail-open: errors are logged but don't propagate.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "availability:".to_string(),
        })
    }

    fn generation_key(&self) -> String {
        format!("{}generation", self.key_prefix)
    }

    fn build_key(&self, generation: u64, key: &str) -> String {
        format!("{}{}:{}", self.key_prefix, generation, key)
    }

    async fn current_generation(&self, conn: &mut ConnectionManager) -> CacheResult<u64> {
        let generation: Option<u64> = conn
            .get(self.generation_key())
            .await
            .map_err(|e| CacheError::OperationError(e.to_string()))?;
        Ok(generation.unwrap_or(0))
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_occupied(&self, key: &str) -> CacheResult<CacheLookup> {
        let mut conn = self.client.clone();

        let generation = match self.current_generation(&mut conn).await {
            Ok(g) => g,
            Err(e) => {
                error!("Redis generation lookup failed: {}", e);
                return Ok(CacheLookup::Unavailable);
            }
        };
        let full_key = self.build_key(generation, key);

        match conn.get::<_, Option<String>>(&full_key).await {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeSet<i64>>(&raw) {
                Ok(ids) => {
                    debug!("Cache HIT: {}", full_key);
                    Ok(CacheLookup::Hit(ids))
                }
                Err(e) => {
                    warn!("Discarding malformed cache entry {}: {}", full_key, e);
                    Ok(CacheLookup::Miss { generation })
                }
            },
            Ok(None) => {
                debug!("Cache MISS: {}", full_key);
                Ok(CacheLookup::Miss { generation })
            }
            Err(e) => {
                error!("Redis GET error for {}: {}", full_key, e);
                Ok(CacheLookup::Unavailable)
            }
        }
    }

    async fn set_occupied(
        &self,
        generation: u64,
        key: &str,
        car_ids: &BTreeSet<i64>,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.client.clone();

        // Written under the generation seen by the lookup. If an invalidation
        // happened since, this entry is already unreachable.
        let full_key = self.build_key(generation, key);
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        let payload = serde_json::to_string(car_ids)
            .map_err(|e| CacheError::OperationError(e.to_string()))?;

        match conn.set_ex::<_, _, ()>(&full_key, payload, ttl).await {
            Ok(_) => {
                debug!("Cache SET: {} ({} cars, TTL: {}s)", full_key, car_ids.len(), ttl);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", full_key, e);
                Ok(())
            }
        }
    }

    async fn invalidate_all(&self) -> CacheResult<()> {
        let mut conn = self.client.clone();

        match conn.incr::<_, _, u64>(self.generation_key(), 1).await {
            Ok(generation) => {
                debug!("Cache INVALIDATE: generation {}", generation);
                Ok(())
            }
            Err(e) => {
                warn!("Redis INCR error: {}", e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
