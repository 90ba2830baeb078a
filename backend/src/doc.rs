//! OpenAPI document for the HTTP surface.
//!
//! Served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    ApplicationCooldown, ErrorBody, ErrorCode, Role, SessionPayload, User, UserStats,
};
use crate::inbound::http::admin::{UpdateRoleRequest, UpdateRoleResponse, UserSummary};
use crate::inbound::http::applications::CooldownsResponse;
use crate::inbound::http::cookies::{CookieConsentRequest, SuccessResponse};
use crate::inbound::http::debug::{DebugSessionInfoResponse, DebugSessionResponse};
use crate::inbound::http::sign_in::{DevLoginRequest, DevLoginResponse};
use crate::inbound::http::user_stats::UserStatsResponse;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Private session cookie issued by the sign-in flow.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Arena backend API",
        description = "Community site endpoints guarded by session roles, plus health probes."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::admin::update_role,
        crate::inbound::http::applications::list_cooldowns,
        crate::inbound::http::cookies::accept_cookies,
        crate::inbound::http::user_stats::user_stats,
        crate::inbound::http::debug::debug_session,
        crate::inbound::http::debug::debug_session_info,
        crate::inbound::http::sign_in::dev_login,
        crate::inbound::http::sign_in::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorBody,
        ErrorCode,
        User,
        Role,
        UserStats,
        ApplicationCooldown,
        SessionPayload,
        UpdateRoleRequest,
        UpdateRoleResponse,
        UserSummary,
        CooldownsResponse,
        CookieConsentRequest,
        SuccessResponse,
        UserStatsResponse,
        DebugSessionResponse,
        DebugSessionInfoResponse,
        DevLoginRequest,
        DevLoginResponse,
    )),
    tags(
        (name = "admin", description = "Administrator operations"),
        (name = "users", description = "Member-facing user data"),
        (name = "cookies", description = "Cookie consent logging"),
        (name = "auth", description = "Session issuance"),
        (name = "debug", description = "Development-only diagnostics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
