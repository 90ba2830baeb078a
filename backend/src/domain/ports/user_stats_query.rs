//! Driving port for per-user participation statistics.

use async_trait::async_trait;

use crate::domain::{Error, UserId, UserStats};

/// Domain use-case port aggregating a user's battle signups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStatsQuery: Send + Sync {
    async fn stats_for(&self, user_id: &UserId) -> Result<UserStats, Error>;
}
