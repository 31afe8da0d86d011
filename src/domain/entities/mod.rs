//! Core domain entities.
//!
//! Entities are plain data structures. Every persisted record type implements
//! [`Entity`], which is all the generic repository and service layers need to
//! know about it.
//!
//! # Entity Types
//!
//! - [`User`] - A registered user

pub mod user;

pub use user::User;

use uuid::Uuid;

/// A persisted record with a UUID identifier.
///
/// `NAME` is the record type name used to namespace cache keys
/// (`"{NAME}_List"`, `"{NAME}_Id_{id}"`).
pub trait Entity: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn id(&self) -> Uuid;
}
