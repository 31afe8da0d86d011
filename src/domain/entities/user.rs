//! User entity.

use super::Entity;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: Uuid, full_name: String, email: String, phone: Option<String>) -> Self {
        Self {
            id,
            full_name,
            email,
            phone,
        }
    }

    /// Returns true if the email address ends with `@{domain}`.
    ///
    /// The comparison is an exact, case-sensitive suffix match.
    pub fn has_email_domain(&self, domain: &str) -> bool {
        self.email
            .strip_suffix(domain)
            .is_some_and(|local| local.ends_with('@'))
    }
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }
}
