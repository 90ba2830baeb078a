//! Cookie consent handler.
//!
//! ```text
//! POST /api/cookies/accept {"accepted":true,"timestamp":"2026-03-01T12:00:00Z"}
//! ```

use actix_web::http::header::{HeaderMap, USER_AGENT};
use actix_web::{HttpRequest, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CookieConsent, ErrorBody};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const FORWARDED_FOR: &str = "x-forwarded-for";
const REAL_IP: &str = "x-real-ip";

/// Consent request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CookieConsentRequest {
    pub accepted: bool,
    /// Instant the visitor made the choice (RFC 3339).
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgement body shared by fire-and-forget endpoints.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Client address as reported by the nearest proxy.
///
/// Takes the first non-empty `X-Forwarded-For` entry, then `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<&str> {
    header_str(headers, FORWARDED_FOR)
        .and_then(|raw| raw.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .or_else(|| header_str(headers, REAL_IP))
}

/// Record a cookie consent decision.
#[utoipa::path(
    post,
    path = "/api/cookies/accept",
    request_body = CookieConsentRequest,
    responses(
        (status = 200, description = "Consent recorded", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["cookies"],
    operation_id = "acceptCookies",
    security([])
)]
#[post("/cookies/accept")]
pub async fn accept_cookies(
    req: HttpRequest,
    state: web::Data<HttpState>,
    payload: web::Json<CookieConsentRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let headers = req.headers();
    let CookieConsentRequest {
        accepted,
        timestamp,
    } = payload.into_inner();
    let consent = CookieConsent::new(
        client_ip(headers),
        header_str(headers, USER_AGENT.as_str()),
        accepted,
        timestamp,
    );
    state.consents.record(consent).await?;
    Ok(web::Json(SuccessResponse::ok()))
}
