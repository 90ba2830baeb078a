//! PostgreSQL-backed [`SignupRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{SignupRepository, SignupRepositoryError};
use crate::domain::{SignupActivity, SignupStatus, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{battle_signups, battles};

#[derive(Clone)]
pub struct DieselSignupRepository {
    pool: DbPool,
}

impl DieselSignupRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert joined rows, skipping statuses this build does not recognise.
fn into_activity(rows: Vec<(String, DateTime<Utc>)>) -> Vec<SignupActivity> {
    rows.into_iter()
        .filter_map(|(raw, battle_starts_at)| match raw.parse::<SignupStatus>() {
            Ok(status) => Some(SignupActivity {
                status,
                battle_starts_at,
            }),
            Err(err) => {
                warn!(%err, "skipping signup with unknown status");
                None
            }
        })
        .collect()
}

#[async_trait]
impl SignupRepository for DieselSignupRepository {
    async fn signups_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<SignupActivity>, SignupRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SignupRepositoryError::connection))?;

        let rows = battle_signups::table
            .inner_join(battles::table)
            .filter(battle_signups::user_id.eq(*user_id.as_uuid()))
            .select((battle_signups::status, battles::starts_at))
            .load::<(String, DateTime<Utc>)>(&mut conn)
            .await
            .map_err(|err| {
                map_diesel_error(
                    err,
                    SignupRepositoryError::query,
                    SignupRepositoryError::connection,
                )
            })?;

        Ok(into_activity(rows))
    }
}
