//! Store selection and connectivity checks.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use super::{InMemoryRepository, PgRepository};
use crate::config::Config;
use crate::domain::entities::User;
use crate::domain::repositories::Repository;
use crate::error::AppError;

/// Backing store chosen at startup.
#[derive(Clone)]
pub enum Store {
    Postgres(Arc<PgPool>),
    Memory { users: Arc<InMemoryRepository<User>> },
}

impl Store {
    /// Connects to the configured store and applies pending migrations.
    ///
    /// `DATABASE_URL=memory://` selects a process-local store that starts empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot connect or a migration fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        if config.is_in_memory_store() {
            tracing::warn!("Using in-memory store, data is lost on restart");
            return Ok(Self::memory());
        }

        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");

        Ok(Self::Postgres(Arc::new(pool)))
    }

    /// Empty process-local store.
    pub fn memory() -> Self {
        Self::Memory {
            users: Arc::new(InMemoryRepository::new()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory { .. } => "memory",
        }
    }

    /// Repository for users backed by this store.
    pub fn user_repository(&self) -> Arc<dyn Repository<User>> {
        match self {
            Self::Postgres(pool) => Arc::new(PgRepository::<User>::new(pool.clone())),
            Self::Memory { users } => users.clone(),
        }
    }

    /// Round-trips a trivial query to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the database is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool.as_ref()).await?;
                Ok(())
            }
            Self::Memory { .. } => Ok(()),
        }
    }
}
