//! Development-only session introspection.
//!
//! ```text
//! GET /api/debug/session
//! GET /api/debug/session-info
//! ```
//!
//! Both routes answer `404` outside development mode.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ErrorBody, Role, SessionPayload, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::DevelopmentOnly;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Raw session dump.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DebugSessionResponse {
    pub session: Option<SessionPayload>,
    pub timestamp: DateTime<Utc>,
}

/// Session dump alongside the resolved user.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DebugSessionInfoResponse {
    pub session: Option<SessionPayload>,
    pub user: Option<User>,
    pub role: Option<Role>,
}

/// Dump the raw session payload.
#[utoipa::path(
    get,
    path = "/api/debug/session",
    responses(
        (status = 200, description = "Session payload", body = DebugSessionResponse),
        (status = 404, description = "Not in development mode", body = ErrorBody)
    ),
    tags = ["debug"],
    operation_id = "debugSession",
    security([])
)]
#[get("/debug/session")]
pub async fn debug_session(
    _guard: DevelopmentOnly,
    session: SessionContext,
) -> web::Json<DebugSessionResponse> {
    web::Json(DebugSessionResponse {
        session: session.payload(),
        timestamp: Utc::now(),
    })
}

/// Dump the session payload and the user it resolves to.
#[utoipa::path(
    get,
    path = "/api/debug/session-info",
    responses(
        (status = 200, description = "Session and resolved user", body = DebugSessionInfoResponse),
        (status = 404, description = "Not in development mode", body = ErrorBody),
        (status = 503, description = "User store unavailable", body = ErrorBody)
    ),
    tags = ["debug"],
    operation_id = "debugSessionInfo",
    security([])
)]
#[get("/debug/session-info")]
pub async fn debug_session_info(
    _guard: DevelopmentOnly,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DebugSessionInfoResponse>> {
    let payload = session.payload();
    let user = match &payload {
        Some(payload) => state.users.find_by_id(&payload.user_id).await?,
        None => None,
    };
    Ok(web::Json(DebugSessionInfoResponse {
        role: user.as_ref().map(User::role),
        session: payload,
        user,
    }))
}
