//! Mapping between stored records and transfer objects.

pub mod user_mapper;

pub use user_mapper::UserMapper;

use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::domain::entities::Entity;

/// Mapping contract between a record type and its transfer objects.
///
/// Creation takes the identifier explicitly: the service generates it and the
/// mapper must place it on the record, so no runtime inspection of the record
/// type is needed.
pub trait EntityMapper: Send + Sync + 'static {
    type Entity: Entity;
    /// Read model; cached as JSON.
    type Dto: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;
    type CreateDto: Send + 'static;
    type UpdateDto: Send + 'static;

    fn to_dto(entity: &Self::Entity) -> Self::Dto;

    fn from_create(id: Uuid, dto: Self::CreateDto) -> Self::Entity;

    /// Maps an update request to the full replacement record.
    fn from_update(dto: Self::UpdateDto) -> Self::Entity;
}
