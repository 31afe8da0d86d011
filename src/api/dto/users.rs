//! Query parameters for user listing.

use serde::Deserialize;

/// `GET /users` query string.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    /// Restrict results to emails ending in `@{email_domain}`.
    pub email_domain: Option<String>,
}
