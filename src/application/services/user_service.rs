//! User-specific queries on top of the generic CRUD service.

use tracing::debug;

use super::CrudService;
use crate::application::dto::UserDto;
use crate::application::mappers::{EntityMapper, UserMapper};
use crate::error::AppError;

/// CRUD over users plus domain filtering.
pub type UserService = CrudService<UserMapper>;

impl CrudService<UserMapper> {
    /// Returns users whose email ends with `@{domain}`.
    ///
    /// Always reads from the store; results are not cached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the store fails.
    pub async fn get_by_email_domain(&self, domain: &str) -> Result<Vec<UserDto>, AppError> {
        let users = self.repository().get_all().await?;

        let matching: Vec<UserDto> = users
            .iter()
            .filter(|user| user.has_email_domain(domain))
            .map(UserMapper::to_dto)
            .collect();

        debug!(domain, count = matching.len(), "Filtered users by email domain");
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::MockRepository;
    use crate::infrastructure::cache::{MemoryCache, MockCacheService};
    use crate::infrastructure::persistence::InMemoryRepository;
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    const TTL: Duration = Duration::from_secs(300);

    fn user(email: &str) -> User {
        User::new(Uuid::new_v4(), "Some User".to_string(), email.to_string(), None)
    }

    #[tokio::test]
    async fn test_filters_by_exact_domain() {
        let repo = InMemoryRepository::with_records(vec![user("a@x.com"), user("b@y.com")]);
        let service = UserService::new(Arc::new(repo), Arc::new(MemoryCache::new(TTL)), TTL);

        let result = service.get_by_email_domain("x.com").await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].email, "a@x.com");
    }

    #[tokio::test]
    async fn test_subdomain_and_case_do_not_match() {
        let repo = InMemoryRepository::with_records(vec![
            user("a@mail.x.com"),
            user("b@X.COM"),
            user("c@notx.com"),
        ]);
        let service = UserService::new(Arc::new(repo), Arc::new(MemoryCache::new(TTL)), TTL);

        assert!(service.get_by_email_domain("x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bypasses_cache() {
        let mut repo = MockRepository::<User>::new();
        repo.expect_get_all()
            .times(2)
            .returning(|| Ok(vec![user("a@x.com")]));

        let mut cache = MockCacheService::new();
        cache.expect_get().times(0);
        cache.expect_set().times(0);

        let service = UserService::new(Arc::new(repo), Arc::new(cache), TTL);

        service.get_by_email_domain("x.com").await.unwrap();
        service.get_by_email_domain("x.com").await.unwrap();
    }
}
