//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, cache setup, background tasks, and Axum server lifecycle.

use crate::api::handlers::check_health;
use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::Store;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Interval between sweeps of expired in-memory cache entries.
const CACHE_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or the in-memory store)
/// - Cache backend (memory, Redis with memory fallback, or disabled)
/// - Background cache purge and health probe tasks
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Store::connect(&config).await?;
    let cache = build_cache(&config).await;

    let state = AppState::new(&config, store, cache);
    spawn_health_monitor(
        state.clone(),
        Duration::from_secs(config.health_check_interval_seconds),
    );

    let app = app_router(state, &config)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the cache backend. A Redis connection failure falls back to the
/// in-memory cache so the service still starts.
async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let ttl = config.cache_ttl();

    match (config.cache_backend, config.redis_url.as_deref()) {
        (CacheBackend::Redis, Some(redis_url)) => match RedisCache::connect(redis_url, ttl).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using in-memory cache.", e);
                memory_cache(ttl)
            }
        },
        (CacheBackend::None, _) => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
        _ => {
            tracing::info!("Cache enabled (in-memory)");
            memory_cache(ttl)
        }
    }
}

fn memory_cache(ttl: Duration) -> Arc<dyn CacheService> {
    let cache = Arc::new(MemoryCache::new(ttl));

    let sweeper = cache.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CACHE_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sweeper.purge_expired();
            if purged > 0 {
                tracing::debug!(purged, "Purged expired cache entries");
            }
        }
    });

    cache
}

/// Periodically probes the store and the cache and logs degradations.
fn spawn_health_monitor(state: AppState, period: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let report = check_health(&state).await;
            if report.is_healthy() {
                tracing::debug!("Health check passed");
            } else {
                tracing::warn!(
                    database = ?report.checks.database.message,
                    cache = ?report.checks.cache.message,
                    "Health check degraded"
                );
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
