//! Application review handlers.
//!
//! ```text
//! GET /api/applications/cooldowns
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationCooldown, ErrorBody};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Admin;
use crate::inbound::http::state::HttpState;

/// Cooldown listing response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CooldownsResponse {
    pub cooldowns: Vec<ApplicationCooldown>,
}

/// List application cooldowns that have not yet expired.
#[utoipa::path(
    get,
    path = "/api/applications/cooldowns",
    responses(
        (status = 200, description = "Active cooldowns", body = CooldownsResponse),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 403, description = "Not an administrator", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["admin"],
    operation_id = "listCooldowns"
)]
#[get("/applications/cooldowns")]
pub async fn list_cooldowns(
    _admin: Admin,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CooldownsResponse>> {
    let cooldowns = state.cooldowns.active_cooldowns().await?;
    Ok(web::Json(CooldownsResponse { cooldowns }))
}
