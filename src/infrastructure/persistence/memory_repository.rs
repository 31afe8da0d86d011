//! Process-local repository implementation.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::Entity;
use crate::domain::repositories::{Change, ChangeSet, Repository};
use crate::error::AppError;

/// Repository keeping records in a map guarded by an async `RwLock`.
///
/// Behaves like [`super::PgRepository`]: reads are ordered by id, a change set
/// is applied all-or-nothing, and inserting an existing id is a store error
/// (primary key violation).
pub struct InMemoryRepository<E> {
    rows: RwLock<HashMap<Uuid, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a repository pre-populated with `records`.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        Self {
            rows: RwLock::new(records.into_iter().map(|r| (r.id(), r)).collect()),
        }
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, AppError> {
        let rows = self.rows.read().await;
        let mut records: Vec<E> = rows.values().cloned().collect();
        records.sort_by_key(|r| r.id());
        Ok(records)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save_changes(&self, changes: ChangeSet<E>) -> Result<u64, AppError> {
        if changes.is_empty() {
            return Ok(0);
        }

        let mut rows = self.rows.write().await;
        // Applied to a copy so a failing change leaves the store untouched.
        let mut staged = rows.clone();
        let mut affected = 0;

        for change in changes {
            match change {
                Change::Insert(record) => {
                    let id = record.id();
                    if staged.contains_key(&id) {
                        return Err(AppError::store(
                            "Duplicate primary key",
                            json!({ "entity": E::NAME, "id": id }),
                        ));
                    }
                    staged.insert(id, record);
                    affected += 1;
                }
                Change::Update(record) => {
                    if let Some(row) = staged.get_mut(&record.id()) {
                        *row = record;
                        affected += 1;
                    }
                }
                Change::Delete(record) => {
                    if staged.remove(&record.id()).is_some() {
                        affected += 1;
                    }
                }
            }
        }

        *rows = staged;
        debug!(entity = E::NAME, affected, "Committed staged changes");

        Ok(affected)
    }
}
