//! Port for reading a user's battle signups.

use async_trait::async_trait;

use crate::domain::{SignupActivity, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by signup repository adapters.
    pub enum SignupRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "signup repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "signup repository query failed: {message}",
    }
}

/// Driven port listing signups joined with their battle start time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupRepository: Send + Sync {
    async fn signups_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SignupActivity>, SignupRepositoryError>;
}

/// Fixture repository reporting no signups.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSignupRepository;

#[async_trait]
impl SignupRepository for FixtureSignupRepository {
    async fn signups_for_user(
        &self,
        _user_id: &UserId,
    ) -> Result<Vec<SignupActivity>, SignupRepositoryError> {
        Ok(Vec::new())
    }
}
