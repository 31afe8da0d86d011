//! Generic repository trait for record data access.

use crate::domain::entities::Entity;
use crate::domain::repositories::ChangeSet;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for a single record type.
///
/// Reads go straight to the store. Writes are staged in a [`ChangeSet`] by the
/// caller and applied by [`Repository::save_changes`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Returns all records.
    ///
    /// Order is defined by the implementation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store faults.
    async fn get_all(&self) -> Result<Vec<E>, AppError>;

    /// Point lookup by identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(E))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on store faults.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, AppError>;

    /// Durably applies all staged changes in one transaction.
    ///
    /// Returns the number of rows affected. An update or delete whose
    /// identifier matches no row affects zero rows and is not an error.
    /// If any change fails, none of them are applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on connectivity or constraint failures.
    async fn save_changes(&self, changes: ChangeSet<E>) -> Result<u64, AppError>;
}
