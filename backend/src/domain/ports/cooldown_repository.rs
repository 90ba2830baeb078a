//! Port for reading application cooldowns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ApplicationCooldown;

use super::define_port_error;

define_port_error! {
    /// Errors raised by cooldown repository adapters.
    pub enum CooldownRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "cooldown repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "cooldown repository query failed: {message}",
    }
}

/// Driven port listing cooldowns that are still in force.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CooldownRepository: Send + Sync {
    /// Cooldowns whose expiry lies strictly after `now`, soonest first.
    async fn active_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ApplicationCooldown>, CooldownRepositoryError>;
}

/// Fixture repository reporting no cooldowns.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCooldownRepository;

#[async_trait]
impl CooldownRepository for FixtureCooldownRepository {
    async fn active_at(
        &self,
        _now: DateTime<Utc>,
    ) -> Result<Vec<ApplicationCooldown>, CooldownRepositoryError> {
        Ok(Vec::new())
    }
}
