//! Business logic services for the application layer.

pub mod auth_service;
pub mod cache_keys;
pub mod crud_service;
pub mod user_service;

pub use auth_service::{AuthService, Claims};
pub use crud_service::CrudService;
pub use user_service::UserService;
