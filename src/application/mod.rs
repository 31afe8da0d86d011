//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! cache lookups and mapping between stored records and transfer objects.
//! Services consume repository and cache traits and provide a clean API for
//! HTTP handlers.
//!
//! # Modules
//!
//! - [`dto`] - Transfer objects exchanged with clients
//! - [`mappers`] - Explicit record ↔ transfer object mapping contracts
//! - [`services`] - Generic CRUD, user-specific and authentication services

pub mod dto;
pub mod mappers;
pub mod services;
