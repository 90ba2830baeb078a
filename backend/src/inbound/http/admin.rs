//! Administrative handlers.
//!
//! ```text
//! POST /api/admin/update-role {"email":"ada@example.com","role":"admin"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Email, Error, ErrorBody, Role, User, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Admin;
use crate::inbound::http::state::HttpState;

/// Role update request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateRoleRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "admin")]
    pub role: String,
}

/// Public projection of an updated user.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            email: user.email().to_string(),
            username: user.username().to_owned(),
            role: user.role(),
        }
    }
}

/// Role update response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateRoleResponse {
    pub message: String,
    pub user: UserSummary,
}

fn validation_error(field: &'static str, err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

fn parse_request(body: UpdateRoleRequest) -> Result<(Email, Role), Error> {
    let email = Email::new(&body.email).map_err(|err| validation_error("email", err))?;
    let role = body
        .role
        .parse::<Role>()
        .map_err(|err| validation_error("role", err))?;
    Ok((email, role))
}

/// Change a user's role.
///
/// The admin gate runs before the body is inspected, so an unauthorised
/// caller learns nothing about request validity.
#[utoipa::path(
    post,
    path = "/api/admin/update-role",
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UpdateRoleResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Not an administrator", body = ErrorBody),
        (status = 404, description = "Unknown email", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["admin"],
    operation_id = "updateRole"
)]
#[post("/admin/update-role")]
pub async fn update_role(
    admin: Admin,
    state: web::Data<HttpState>,
    payload: Result<web::Json<UpdateRoleRequest>, Error>,
) -> ApiResult<web::Json<UpdateRoleResponse>> {
    let (email, role) = parse_request(payload?.into_inner())?;
    let updated = state.users.update_role(&email, role).await?;
    info!(
        actor = %admin.identity().id(),
        target = %email,
        role = %role,
        "administrator changed user role"
    );
    Ok(web::Json(UpdateRoleResponse {
        message: format!("Role updated to {role}"),
        user: UserSummary::from(&updated),
    }))
}
