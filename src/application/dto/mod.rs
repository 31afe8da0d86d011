//! Transfer objects for external exchange.
//!
//! DTOs use Serde for JSON and `validator` for input rules. Read models are
//! also what the cache stores.

pub mod user_dto;

pub use user_dto::{CreateUserDto, UpdateUserDto, UserDto};
