//! Request and response bodies specific to the HTTP surface.
//!
//! User bodies are the application transfer objects in
//! [`crate::application::dto`].

pub mod auth;
pub mod health;
pub mod users;
