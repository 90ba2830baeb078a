//! Port abstraction for user persistence adapters and their errors.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Email, Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Driven port over the user table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by email address.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// Set the role of the user keyed by `email`.
    ///
    /// Returns the updated user, or `None` when no user has that email.
    async fn update_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError>;
}

/// In-memory repository used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Create a repository seeded with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Mutex::new(users.into_iter().collect()),
        }
    }

    fn with_users_locked<T>(
        &self,
        f: impl FnOnce(&mut Vec<User>) -> T,
    ) -> Result<T, UserPersistenceError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_users_locked(|users| users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        self.with_users_locked(|users| {
            users
                .iter()
                .find(|user| user.email().as_ref().eq_ignore_ascii_case(email.as_ref()))
                .cloned()
        })
    }

    async fn update_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.with_users_locked(|users| {
            let user = users
                .iter_mut()
                .find(|user| user.email().as_ref().eq_ignore_ascii_case(email.as_ref()))?;
            *user = user.clone().with_role(role);
            Some(user.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> InMemoryUserRepository {
        let user = User::new(
            UserId::random(),
            Email::new("ada@example.com").expect("email"),
            "ada",
            Role::Member,
            Utc::now(),
        )
        .expect("user");
        InMemoryUserRepository::with_users([user])
    }

    #[rstest]
    #[tokio::test]
    async fn update_role_persists_new_role(repository: InMemoryUserRepository) {
        let email = Email::new("ADA@example.com").expect("email");
        let updated = repository
            .update_role(&email, Role::Admin)
            .await
            .expect("update succeeds")
            .expect("user exists");
        assert_eq!(updated.role(), Role::Admin);

        let reloaded = repository
            .find_by_id(updated.id())
            .await
            .expect("lookup succeeds")
            .expect("user exists");
        assert_eq!(reloaded.role(), Role::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn update_role_for_unknown_email_is_none(repository: InMemoryUserRepository) {
        let email = Email::new("nobody@example.com").expect("email");
        let result = repository
            .update_role(&email, Role::Admin)
            .await
            .expect("update succeeds");
        assert!(result.is_none());
    }
}
