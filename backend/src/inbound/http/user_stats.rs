//! Member statistics handler.
//!
//! ```text
//! GET /api/user/stats
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

use crate::domain::{ErrorBody, UserStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::state::HttpState;

/// Statistics response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UserStatsResponse {
    pub stats: UserStats,
}

/// Participation counts for the signed-in user.
#[utoipa::path(
    get,
    path = "/api/user/stats",
    responses(
        (status = 200, description = "Participation counts", body = UserStatsResponse),
        (status = 401, description = "Not signed in", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "userStats"
)]
#[get("/user/stats")]
pub async fn user_stats(
    member: Authenticated,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<UserStatsResponse>> {
    let stats = state.stats.stats_for(member.identity().id()).await?;
    Ok(web::Json(UserStatsResponse { stats }))
}
