//! In-process cache with per-entry absolute expiration.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local cache backed by a concurrent map.
///
/// Entries are never shared across processes. Expired entries are treated as
/// absent on read and removed lazily; [`MemoryCache::purge_expired`] sweeps the
/// rest and is called periodically by the server.
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty cache. `default_ttl` applies when `set` is called without a TTL.
    pub fn new(default_ttl: Duration) -> Self {
        debug!("Using MemoryCache (default TTL: {:?})", default_ttl);
        Self {
            entries: DashMap::new(),
            default_ttl,
        }
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        // The map guard must be released before `remove_if` touches the same shard.
        let lookup = self
            .entries
            .get(key)
            .map(|entry| (!entry.is_expired(now)).then(|| entry.value.clone()));

        match lookup {
            Some(Some(value)) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(value))
            }
            Some(None) => {
                self.entries.remove_if(key, |_, entry| entry.is_expired(now));
                debug!("Cache EXPIRED: {}", key);
                Ok(None)
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> CacheResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        debug!("Cache SET: {} (TTL: {:?})", key, ttl);
        Ok(())
    }

    async fn remove(&self, key: &str) -> CacheResult<()> {
        if self.entries.remove(key).is_some() {
            debug!("Cache INVALIDATE: {}", key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
