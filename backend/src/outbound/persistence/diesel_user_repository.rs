//! PostgreSQL-backed [`UserRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Role, User, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;

diesel::define_sql_function!(fn lower(x: Text) -> Text);

/// Diesel adapter over the `users` table. Email matching is
/// case-insensitive, mirroring the unique index on `lower(email)`.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let decode = || -> Result<User, String> {
        let email = Email::new(&row.email).map_err(|err| err.to_string())?;
        let role = row.role.parse::<Role>().map_err(|err| err.to_string())?;
        User::new(
            UserId::from_uuid(row.id),
            email,
            row.username,
            role,
            row.created_at,
        )
        .map_err(|err| err.to_string())
    };
    decode().map_err(|reason| {
        warn!(user_id = %id, %reason, "stored user row is invalid");
        UserPersistenceError::query(format!("stored user {id} is invalid"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = users::table
            .filter(lower(users::email).eq(email.as_ref().to_lowercase()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update_role(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, UserPersistenceError::connection))?;

        let row = diesel::update(
            users::table.filter(lower(users::email).eq(email.as_ref().to_lowercase())),
        )
        .set(users::role.eq(role.as_str()))
        .returning(UserRow::as_returning())
        .get_result::<UserRow>(&mut conn)
        .await
        .optional()
        .map_err(map_error)?;

        row.map(row_to_user).transpose()
    }
}
