//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod applications;
pub mod auth;
pub mod cookies;
pub mod debug;
pub mod error;
pub mod health;
pub mod session;
pub mod session_config;
pub mod sign_in;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod user_stats;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` handler on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use arena_backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .service(admin::update_role)
        .service(applications::list_cooldowns)
        .service(cookies::accept_cookies)
        .service(user_stats::user_stats)
        .service(debug::debug_session)
        .service(debug::debug_session_info)
        .service(sign_in::dev_login)
        .service(sign_in::logout);
}
