//! User directory service backing identity resolution and role changes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::ports::{UserDirectory, UserPersistenceError, UserRepository};
use super::{Email, Error, Role, User, UserId};

/// [`UserDirectory`] implementation over a [`UserRepository`].
#[derive(Clone)]
pub struct UserDirectoryService {
    users: Arc<dyn UserRepository>,
}

impl UserDirectoryService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    error!(error = %err, "user repository failure");
    match err {
        UserPersistenceError::Connection { .. } => {
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { .. } => Error::internal("user store query failed"),
    }
}

#[async_trait]
impl UserDirectory for UserDirectoryService {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_persistence_error)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_persistence_error)
    }

    async fn update_role(&self, email: &Email, role: Role) -> Result<User, Error> {
        let updated = self
            .users
            .update_role(email, role)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no user with email {email}")))?;
        info!(user_id = %updated.id(), role = %role, "user role updated");
        Ok(updated)
    }
}
