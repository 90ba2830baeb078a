//! PostgreSQL-backed [`CookieConsentRepository`].

use async_trait::async_trait;
use diesel_async::RunQueryDsl;

use crate::domain::CookieConsent;
use crate::domain::ports::{CookieConsentRepository, CookieConsentRepositoryError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewCookieConsentRow;
use super::pool::DbPool;
use super::schema::cookie_consents;

/// Appends consent records; `recorded_at` is filled by the database.
#[derive(Clone)]
pub struct DieselCookieConsentRepository {
    pool: DbPool,
}

impl DieselCookieConsentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CookieConsentRepository for DieselCookieConsentRepository {
    async fn insert(&self, consent: &CookieConsent) -> Result<(), CookieConsentRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CookieConsentRepositoryError::connection))?;

        let row = NewCookieConsentRow {
            ip_address: &consent.ip_address,
            user_agent: &consent.user_agent,
            accepted: consent.accepted,
            consented_at: consent.consented_at,
        };

        diesel::insert_into(cookie_consents::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                map_diesel_error(
                    err,
                    CookieConsentRepositoryError::query,
                    CookieConsentRepositoryError::connection,
                )
            })
    }
}
