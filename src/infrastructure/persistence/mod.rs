//! Repository implementations.
//!
//! Concrete implementations of the domain [`crate::domain::repositories::Repository`]
//! trait.
//!
//! # Repositories
//!
//! - [`PgRepository`] - PostgreSQL storage, generic over a [`PgTable`] description
//! - [`InMemoryRepository`] - Process-local storage for tests and `DATABASE_URL=memory://`

pub mod memory_repository;
pub mod pg_repository;
pub mod pg_user_table;
pub mod store;

pub use memory_repository::InMemoryRepository;
pub use pg_repository::{PgRepository, PgTable};
pub use store::Store;
