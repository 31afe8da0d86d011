//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AuthService, UserService};
use crate::config::Config;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::Store;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
    pub cache: Arc<dyn CacheService>,
    pub store: Store,
}

impl AppState {
    /// Wires services on top of an already connected store and cache.
    pub fn new(config: &Config, store: Store, cache: Arc<dyn CacheService>) -> Self {
        Self::with_settings(
            store,
            cache,
            config.cache_ttl(),
            AuthService::new(
                &config.jwt,
                config.auth_username.clone(),
                config.auth_password.clone(),
            ),
        )
    }

    pub fn with_settings(
        store: Store,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
        auth_service: AuthService,
    ) -> Self {
        let user_service = UserService::new(store.user_repository(), cache.clone(), cache_ttl);

        Self {
            user_service: Arc::new(user_service),
            auth_service: Arc::new(auth_service),
            cache,
            store,
        }
    }
}
