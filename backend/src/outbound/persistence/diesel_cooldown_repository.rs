//! PostgreSQL-backed [`CooldownRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CooldownRepository, CooldownRepositoryError};
use crate::domain::{ApplicationCooldown, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::CooldownRow;
use super::pool::DbPool;
use super::schema::application_cooldowns;

#[derive(Clone)]
pub struct DieselCooldownRepository {
    pool: DbPool,
}

impl DieselCooldownRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<CooldownRow> for ApplicationCooldown {
    fn from(row: CooldownRow) -> Self {
        Self {
            user_id: UserId::from_uuid(row.user_id),
            reason: row.reason,
            expires_at: row.expires_at,
        }
    }
}

#[async_trait]
impl CooldownRepository for DieselCooldownRepository {
    async fn active_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<ApplicationCooldown>, CooldownRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CooldownRepositoryError::connection))?;

        let rows = application_cooldowns::table
            .filter(application_cooldowns::expires_at.gt(now))
            .order(application_cooldowns::expires_at.asc())
            .select(CooldownRow::as_select())
            .load::<CooldownRow>(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    CooldownRepositoryError::query,
                    CooldownRepositoryError::connection,
                )
            })?;

        Ok(rows.into_iter().map(ApplicationCooldown::from).collect())
    }
}
