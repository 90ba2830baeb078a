//! Session issuance handlers.
//!
//! ```text
//! POST /api/auth/dev-login {"email":"ada@example.com"}
//! POST /api/auth/logout
//! ```
//!
//! Production sessions are issued by the external identity provider flow;
//! `dev-login` exists so the API can be exercised locally.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Email, Error, ErrorBody, SessionPayload, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::DevelopmentOnly;
use crate::inbound::http::cookies::SuccessResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Development sign-in request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DevLoginRequest {
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Signed-in user.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DevLoginResponse {
    pub user: User,
}

/// Sign in as an existing user without credentials.
#[utoipa::path(
    post,
    path = "/api/auth/dev-login",
    request_body = DevLoginRequest,
    responses(
        (status = 200, description = "Signed in", body = DevLoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 404, description = "Unknown user or not in development mode", body = ErrorBody)
    ),
    tags = ["auth"],
    operation_id = "devLogin",
    security([])
)]
#[post("/auth/dev-login")]
pub async fn dev_login(
    _guard: DevelopmentOnly,
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: Result<web::Json<DevLoginRequest>, Error>,
) -> ApiResult<web::Json<DevLoginResponse>> {
    let email = Email::new(&payload?.email).map_err(|err| {
        Error::invalid_request(err.to_string()).with_details(json!({ "field": "email" }))
    })?;
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| Error::not_found(format!("no user with email {email}")))?;
    session.persist_payload(&SessionPayload::for_user(&user))?;
    info!(user_id = %user.id(), "development sign-in");
    Ok(web::Json(DevLoginResponse { user }))
}

/// Clear the current session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = SuccessResponse)
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<SuccessResponse> {
    session.clear();
    web::Json(SuccessResponse::ok())
}
