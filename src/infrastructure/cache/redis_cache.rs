//! Redis-backed cache for deployments that share entries across instances.

use super::service::{CacheError, CacheResult, CacheService};
use crate::config::mask_connection_string;
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Namespace prepended to every key, so `User_Id_{id}` is stored as
/// `layered-api:User_Id_{id}`.
pub const DEFAULT_KEY_PREFIX: &str = "layered-api:";

/// Cache entries stored as Redis strings with millisecond expiry.
///
/// Command failures are returned as [`CacheError::Command`]. The cache-aside
/// services log them and fall back to the record store.
pub struct RedisCache {
    conn: ConnectionManager,
    default_ttl: Duration,
    key_prefix: String,
}

impl RedisCache {
    /// Connects and verifies the server with a `PING`.
    ///
    /// `default_ttl` applies when [`CacheService::set`] is called with `ttl = None`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the `PING` fails.
    pub async fn connect(redis_url: &str, default_ttl: Duration) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Invalid Redis URL: {}", e))
        })?;

        let mut conn = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        conn.ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        Ok(Self {
            conn,
            default_ttl,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        })
    }

    /// Replaces the key namespace.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

/// Expiry in milliseconds for `PSETEX`, which rejects zero.
fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1)
}

fn command_error(op: &str, key: &str, e: redis::RedisError) -> CacheError {
    CacheError::Command(format!("{} {} failed: {}", op, key, e))
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();

        let value = conn
            .get::<_, Option<String>>(self.namespaced(key))
            .await
            .map_err(|e| command_error("GET", key, e))?;

        if value.is_some() {
            debug!("Cache HIT: {}", key);
        } else {
            debug!("Cache MISS: {}", key);
        }
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let millis = ttl_millis(ttl.unwrap_or(self.default_ttl));

        conn.pset_ex::<_, _, ()>(self.namespaced(key), value, millis)
            .await
            .map_err(|e| command_error("PSETEX", key, e))?;

        debug!("Cache SET: {} (TTL: {}ms)", key, millis);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.conn.clone();

        let deleted = conn
            .del::<_, usize>(self.namespaced(key))
            .await
            .map_err(|e| command_error("DEL", key, e))?;

        if deleted > 0 {
            debug!("Cache INVALIDATE: {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
