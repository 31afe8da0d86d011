//! User transfer objects.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

/// Compiled regex for phone number validation.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()-]{7,20}$").unwrap());

/// User as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Request to create a user. The identifier is assigned by the service.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserDto {
    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub full_name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    #[serde(default)]
    pub phone: Option<String>,
}

/// Request to replace a user. The identifier must match the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserDto {
    pub id: Uuid,

    #[validate(length(min = 3, message = "Full name must be at least 3 characters"))]
    pub full_name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email: String,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    #[serde(default)]
    pub phone: Option<String>,
}
