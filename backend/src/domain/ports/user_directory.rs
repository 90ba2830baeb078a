//! Driving port for user lookups and administrative role changes.
//!
//! Inbound adapters use this port both to resolve session identities and to
//! perform the admin role update, without importing persistence concerns.

use async_trait::async_trait;

use crate::domain::{Email, Error, Role, User, UserId};

/// Domain use-case port over the user directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by id; `None` when the user no longer exists.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, Error>;

    /// Fetch a user by email; `None` when unknown.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, Error>;

    /// Change the role of the user keyed by `email`.
    ///
    /// Callers must already hold an admin authorization decision.
    async fn update_role(&self, email: &Email, role: Role) -> Result<User, Error>;
}
