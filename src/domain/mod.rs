//! Domain layer containing business entities and repository contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Repository traits defined here are implemented in
//! [`crate::infrastructure::persistence`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures and the [`entities::Entity`] contract
//! - [`repositories`] - Generic data access trait and the staged [`repositories::ChangeSet`]

pub mod entities;
pub mod repositories;
