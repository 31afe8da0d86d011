//! Repository trait definitions for the domain layer.
//!
//! A single generic [`Repository`] trait is the only component permitted to
//! issue store queries for a record type. Mutations are staged in a
//! [`ChangeSet`] and applied atomically by [`Repository::save_changes`].
//!
//! # Implementations
//!
//! - [`crate::infrastructure::persistence::PgRepository`] - PostgreSQL
//! - [`crate::infrastructure::persistence::InMemoryRepository`] - process-local map
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod change_set;
pub mod repository;

pub use change_set::{Change, ChangeSet};
pub use repository::Repository;

#[cfg(test)]
pub use repository::MockRepository;
