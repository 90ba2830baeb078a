//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::ServerSettings;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use arena_backend::Trace;
#[cfg(debug_assertions)]
use arena_backend::doc::ApiDoc;
use arena_backend::inbound::http::configure_api;
use arena_backend::inbound::http::health::{HealthState, live, ready};
use arena_backend::inbound::http::state::HttpState;

use state_builders::build_http_state;

const SESSION_COOKIE_NAME: &str = "session";
const SESSION_TTL_HOURS: i64 = 2;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(
            actix_web::cookie::time::Duration::hours(SESSION_TTL_HOURS),
        ))
        .build();

    let api = web::scope("/api").wrap(session).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the process ready.
///
/// Signal handling is left to the caller so liveness can fail before the
/// listener stops; see [`drain`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        environment: _,
        db_pool: _,
    } = config;

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Resolve once SIGINT or, on Unix, SIGTERM arrives.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable"),
        }
    }
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "SIGINT handler unavailable; shutdown must be external");
        std::future::pending::<()>().await;
    }
}

/// Fail the liveness probe, then stop accepting connections and let
/// in-flight requests finish.
pub async fn drain(health_state: &HealthState, handle: &ServerHandle) {
    health_state.mark_unhealthy();
    info!("shutdown started; liveness now failing");
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use arena_backend::domain::TRACE_ID_HEADER;
    use arena_backend::inbound::http::state::Environment;
    use rstest::rstest;
    use serde_json::Value;

    fn config(environment: Environment) -> ServerConfig {
        ServerConfig {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            bind_addr: ([127, 0, 0, 1], 0).into(),
            environment,
            db_pool: None,
        }
    }

    fn deps(environment: Environment) -> AppDependencies {
        let config = config(environment);
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        AppDependencies {
            health_state,
            http_state: web::Data::new(build_http_state(&config)),
            key: config.key,
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[actix_web::test]
    async fn probes_are_served_outside_the_api_scope() {
        let app = test::init_service(build_app(deps(Environment::Production))).await;
        for path in ["/health/ready", "/health/live"] {
            let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request())
                .await;
            assert_eq!(res.status(), StatusCode::OK, "{path}");
        }
    }

    #[rstest]
    #[case("/api/user/stats", StatusCode::UNAUTHORIZED)]
    #[case("/api/applications/cooldowns", StatusCode::UNAUTHORIZED)]
    #[case("/api/debug/session", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn guarded_routes_reject_anonymous_production_requests(
        #[case] path: &str,
        #[case] expected: StatusCode,
    ) {
        let app = test::init_service(build_app(deps(Environment::Production))).await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
        assert_eq!(res.status(), expected);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn dev_login_issues_a_session_for_seeded_users() {
        let app = test::init_service(build_app(deps(Environment::Development))).await;
        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/dev-login")
                .set_json(serde_json::json!({ "email": "player@arena.test" }))
                .to_request(),
        )
        .await;
        assert_eq!(login.status(), StatusCode::OK);
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
            .expect("session cookie")
            .into_owned();

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/user/stats")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["stats"]["totalSignups"], 0);
    }

    #[actix_web::test]
    async fn drain_fails_liveness_before_stopping() {
        let health_state = web::Data::new(HealthState::new());
        let server = create_server(health_state.clone(), config(Environment::Production))
            .expect("bind ephemeral port");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);
        assert!(health_state.is_ready());
        assert!(health_state.is_alive());

        drain(&health_state, &handle).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
