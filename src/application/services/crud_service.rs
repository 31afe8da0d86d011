//! Generic CRUD service with cache-aside reads.

use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::cache_keys;
use crate::application::mappers::EntityMapper;
use crate::domain::entities::Entity;
use crate::domain::repositories::{ChangeSet, Repository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Create/read/update/delete over one record type.
///
/// Reads consult the cache first and populate it on a miss with a fixed TTL.
/// Every successful write removes the affected item key and the list key
/// after the commit. Cache failures are logged and treated as misses.
pub struct CrudService<M: EntityMapper> {
    repository: Arc<dyn Repository<M::Entity>>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Duration,
    _mapper: PhantomData<fn() -> M>,
}

impl<M: EntityMapper> CrudService<M> {
    const ENTITY: &'static str = <M::Entity as Entity>::NAME;

    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// - `repository` - gateway to the store for `M::Entity`
    /// - `cache` - cache backend shared by all services
    /// - `cache_ttl` - lifetime of every entry this service writes
    pub fn new(
        repository: Arc<dyn Repository<M::Entity>>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            cache_ttl,
            _mapper: PhantomData,
        }
    }

    pub(crate) fn repository(&self) -> &dyn Repository<M::Entity> {
        self.repository.as_ref()
    }

    /// Returns every record as a transfer object.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store fails on a cache miss.
    pub async fn get_all(&self) -> Result<Vec<M::Dto>, AppError> {
        let key = cache_keys::list::<M::Entity>();

        if let Some(cached) = self.read_cached::<Vec<M::Dto>>(&key).await {
            return Ok(cached);
        }

        let records = self.repository.get_all().await?;
        let dtos: Vec<M::Dto> = records.iter().map(M::to_dto).collect();

        self.write_cached(&key, &dtos).await;
        Ok(dtos)
    }

    /// Returns one record, or `None` if it does not exist.
    ///
    /// Only found records are cached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store fails on a cache miss.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<M::Dto>, AppError> {
        let key = cache_keys::item::<M::Entity>(id);

        if let Some(cached) = self.read_cached::<M::Dto>(&key).await {
            return Ok(Some(cached));
        }

        let Some(record) = self.repository.get_by_id(id).await? else {
            return Ok(None);
        };

        let dto = M::to_dto(&record);
        self.write_cached(&key, &dto).await;
        Ok(Some(dto))
    }

    /// Creates a record under a freshly generated identifier and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the commit fails; the cache is untouched then.
    pub async fn create(&self, dto: M::CreateDto) -> Result<Uuid, AppError> {
        let record = M::from_create(Uuid::new_v4(), dto);
        let id = record.id();

        let mut changes = ChangeSet::new();
        changes.add(record);
        self.repository.save_changes(changes).await?;

        self.invalidate(&[cache_keys::list::<M::Entity>()]).await;

        info!(entity = Self::ENTITY, %id, "Record created");
        Ok(id)
    }

    /// Replaces a record.
    ///
    /// Returns `false` if no record with the update's identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the commit fails.
    pub async fn update(&self, dto: M::UpdateDto) -> Result<bool, AppError> {
        let record = M::from_update(dto);
        let id = record.id();

        let mut changes = ChangeSet::new();
        changes.update(record);
        let affected = self.repository.save_changes(changes).await?;

        self.invalidate(&[
            cache_keys::item::<M::Entity>(id),
            cache_keys::list::<M::Entity>(),
        ])
        .await;

        if affected == 0 {
            debug!(entity = Self::ENTITY, %id, "Update matched no record");
            return Ok(false);
        }

        info!(entity = Self::ENTITY, %id, "Record updated");
        Ok(true)
    }

    /// Deletes a record.
    ///
    /// Returns `false` without touching the store or cache if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the lookup or commit fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let Some(record) = self.repository.get_by_id(id).await? else {
            return Ok(false);
        };

        let mut changes = ChangeSet::new();
        changes.delete(record);
        self.repository.save_changes(changes).await?;

        self.invalidate(&[
            cache_keys::item::<M::Entity>(id),
            cache_keys::list::<M::Entity>(),
        ])
        .await;

        info!(entity = Self::ENTITY, %id, "Record deleted");
        Ok(true)
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(error = %e, key, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, key, "Cache read failed, falling back to store");
                None
            }
        }
    }

    async fn write_cached<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, key, "Failed to serialize cache entry");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &raw, Some(self.cache_ttl)).await {
            warn!(error = %e, key, "Failed to populate cache");
        }
    }

    async fn invalidate(&self, keys: &[String]) {
        for key in keys {
            if let Err(e) = self.cache.remove(key).await {
                warn!(error = %e, key, "Failed to invalidate cache");
            }
        }
    }
}
