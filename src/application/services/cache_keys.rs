//! Cache key generators for consistent key naming.
//!
//! Keys are namespaced by the record type name so different entities never
//! collide in a shared cache.

use uuid::Uuid;

use crate::domain::entities::Entity;

/// Key for the cached list of all records of type `E`.
pub fn list<E: Entity>() -> String {
    format!("{}_List", E::NAME)
}

/// Key for a single cached record of type `E`.
pub fn item<E: Entity>(id: Uuid) -> String {
    format!("{}_Id_{}", E::NAME, id)
}
