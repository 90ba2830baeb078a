//! Services for user participation statistics and application cooldowns.
//!
//! Both read "now" from an injected clock so the upcoming/completed split and
//! cooldown expiry can be tested deterministically.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::error;

use super::ports::{
    CooldownRepository, CooldownRepositoryError, CooldownsQuery, SignupRepository,
    SignupRepositoryError, UserStatsQuery,
};
use super::{ApplicationCooldown, Error, UserId, UserStats};

/// [`UserStatsQuery`] implementation aggregating signups with
/// [`UserStats::aggregate`].
#[derive(Clone)]
pub struct UserStatsService {
    signups: Arc<dyn SignupRepository>,
    clock: Arc<dyn Clock>,
}

impl UserStatsService {
    pub fn new(signups: Arc<dyn SignupRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { signups, clock }
    }
}

#[async_trait]
impl UserStatsQuery for UserStatsService {
    async fn stats_for(&self, user_id: &UserId) -> Result<UserStats, Error> {
        let signups = self
            .signups
            .signups_for_user(user_id)
            .await
            .map_err(|err| {
                error!(error = %err, user_id = %user_id, "failed to load signups");
                match err {
                    SignupRepositoryError::Connection { .. } => {
                        Error::service_unavailable("signup store unavailable")
                    }
                    SignupRepositoryError::Query { .. } => {
                        Error::internal("failed to load signups")
                    }
                }
            })?;
        Ok(UserStats::aggregate(signups, self.clock.utc()))
    }
}

/// [`CooldownsQuery`] implementation listing cooldowns active at the clock's
/// current instant.
#[derive(Clone)]
pub struct CooldownsService {
    cooldowns: Arc<dyn CooldownRepository>,
    clock: Arc<dyn Clock>,
}

impl CooldownsService {
    pub fn new(cooldowns: Arc<dyn CooldownRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { cooldowns, clock }
    }
}

#[async_trait]
impl CooldownsQuery for CooldownsService {
    async fn active_cooldowns(&self) -> Result<Vec<ApplicationCooldown>, Error> {
        self.cooldowns
            .active_at(self.clock.utc())
            .await
            .map_err(|err| {
                error!(error = %err, "failed to load cooldowns");
                match err {
                    CooldownRepositoryError::Connection { .. } => {
                        Error::service_unavailable("cooldown store unavailable")
                    }
                    CooldownRepositoryError::Query { .. } => {
                        Error::internal("failed to load cooldowns")
                    }
                }
            })
    }
}
