//! Driving port for listing active application cooldowns.

use async_trait::async_trait;

use crate::domain::{ApplicationCooldown, Error};

/// Domain use-case port over application cooldowns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CooldownsQuery: Send + Sync {
    async fn active_cooldowns(&self) -> Result<Vec<ApplicationCooldown>, Error>;
}
