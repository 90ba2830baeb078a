//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{application_cooldowns, cookie_consents, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cookie_consents)]
pub(crate) struct NewCookieConsentRow<'a> {
    pub ip_address: &'a str,
    pub user_agent: &'a str,
    pub accepted: bool,
    pub consented_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = application_cooldowns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CooldownRow {
    pub user_id: Uuid,
    pub reason: String,
    pub expires_at: DateTime<Utc>,
}
