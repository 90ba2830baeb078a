//! Session resolution and authorization extractors.
//!
//! Privileged handlers take [`Authenticated`] or [`Authorized`] in their
//! signature; the extractor resolves the session against the user directory
//! and applies [`authorize`] before the handler body runs. Development-only
//! routes take [`DevelopmentOnly`].

use std::future::{Ready, ready};
use std::marker::PhantomData;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error, warn};

use crate::domain::ports::UserDirectory;
use crate::domain::{
    AdminAccess, Capability, Error, Identity, MemberAccess, Resolution, authorize,
};

use super::session::SessionContext;
use super::state::HttpState;

const RESOLUTION_FAILED: &str = "session could not be resolved";

/// Resolve the identity behind `session`.
///
/// The session only proves who signed in; the role is re-read from the
/// directory so a role change applies to the next request. Lookup failures
/// surface as `401` rather than an internal error.
pub async fn resolve(
    session: &SessionContext,
    users: &dyn UserDirectory,
) -> Result<Resolution, Error> {
    let Some(payload) = session.payload() else {
        return Ok(Resolution::Anonymous);
    };
    match users.find_by_id(&payload.user_id).await {
        Ok(Some(user)) => Ok(Resolution::Authenticated(Identity::from(&user))),
        Ok(None) => {
            debug!(user_id = %payload.user_id, "session refers to a missing user");
            Ok(Resolution::Anonymous)
        }
        Err(err) => {
            warn!(error = %err, user_id = %payload.user_id, "identity lookup failed");
            Err(Error::unauthorized(RESOLUTION_FAILED))
        }
    }
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>().cloned().ok_or_else(|| {
        error!("HttpState is not registered as app data");
        Error::internal("HTTP state unavailable")
    })
}

fn resolve_request(
    req: &HttpRequest,
    payload: &mut Payload,
) -> LocalBoxFuture<'static, Result<Resolution, Error>> {
    let state = http_state(req);
    let session = SessionContext::from_request(req, payload);
    Box::pin(async move {
        let state = state?;
        let session = session.await.map_err(|err| {
            warn!(error = %err, "session extraction failed");
            Error::unauthorized(RESOLUTION_FAILED)
        })?;
        resolve(&session, state.users.as_ref()).await
    })
}

/// Identity that passed the gate for capability `C`.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use arena_backend::domain::AdminAccess;
/// use arena_backend::inbound::http::auth::Authorized;
///
/// async fn admin_only(admin: Authorized<AdminAccess>) -> HttpResponse {
///     HttpResponse::Ok().body(admin.identity().email().to_string())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Authorized<C: Capability> {
    identity: Identity,
    capability: PhantomData<C>,
}

/// Any signed-in user.
pub type Authenticated = Authorized<MemberAccess>;

/// A signed-in administrator.
pub type Admin = Authorized<AdminAccess>;

impl<C: Capability> Authorized<C> {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn into_identity(self) -> Identity {
        self.identity
    }
}

impl<C: Capability> FromRequest for Authorized<C> {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let resolution = resolve_request(req, payload);
        Box::pin(async move {
            let identity = authorize(resolution.await?, C::REQUIRED).into_result()?;
            Ok(Self {
                identity,
                capability: PhantomData,
            })
        })
    }
}

/// Guard admitting requests only when the server runs in development mode.
///
/// Outside development the route answers `404` as if it did not exist.
#[derive(Debug, Clone, Copy)]
pub struct DevelopmentOnly;

impl FromRequest for DevelopmentOnly {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(http_state(req).and_then(|state| {
            if state.environment.is_development() {
                Ok(Self)
            } else {
                Err(Error::not_found("not found"))
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserDirectory;
    use crate::domain::{Role, SessionPayload};
    use crate::inbound::http::state::Environment;
    use crate::inbound::http::test_utils::{
        PLANT_SESSION_PATH, TestState, fixture_user, plant_session, plant_session_request,
        session_cookie, test_session_middleware,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;
    use std::sync::Arc;

    async fn whoami(member: Authenticated) -> HttpResponse {
        HttpResponse::Ok().body(member.identity().role().to_string())
    }

    async fn admin_only(admin: Admin) -> HttpResponse {
        HttpResponse::Ok().body(admin.identity().email().to_string())
    }

    async fn dev_only(_: DevelopmentOnly) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn call(
        directory: MockUserDirectory,
        environment: Environment,
        session: Option<SessionPayload>,
        path: &str,
    ) -> StatusCode {
        let state = TestState {
            users: Arc::new(directory),
            environment,
            ..TestState::default()
        }
        .build();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .route(PLANT_SESSION_PATH, web::post().to(plant_session))
                .route("/whoami", web::get().to(whoami))
                .route("/admin", web::get().to(admin_only))
                .route("/dev", web::get().to(dev_only)),
        )
        .await;

        let mut request = test::TestRequest::get().uri(path);
        if let Some(payload) = session {
            let res = test::call_service(
                &app,
                plant_session_request(&payload).to_request(),
            )
            .await;
            request = request.cookie(session_cookie(&res));
        }
        test::call_service(&app, request.to_request()).await.status()
    }

    fn directory_returning(role: Role) -> (MockUserDirectory, SessionPayload) {
        let user = fixture_user("ada@example.com", role);
        let payload = SessionPayload::for_user(&user);
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        (directory, payload)
    }

    #[rstest]
    #[case("/whoami")]
    #[case("/admin")]
    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised(#[case] path: &str) {
        let status = call(MockUserDirectory::new(), Environment::Production, None, path).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn members_are_forbidden_from_admin_routes() {
        let (directory, payload) = directory_returning(Role::Member);
        let status = call(directory, Environment::Production, Some(payload), "/admin").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case(Role::Member, "/whoami")]
    #[case(Role::Admin, "/whoami")]
    #[case(Role::Admin, "/admin")]
    #[actix_web::test]
    async fn sufficient_roles_pass(#[case] role: Role, #[case] path: &str) {
        let (directory, payload) = directory_returning(role);
        let status = call(directory, Environment::Production, Some(payload), path).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn stale_session_role_is_replaced_by_stored_role() {
        let (directory, mut payload) = directory_returning(Role::Member);
        payload.role = Role::Admin;
        let status = call(directory, Environment::Production, Some(payload), "/admin").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn deleted_users_resolve_as_anonymous() {
        let user = fixture_user("gone@example.com", Role::Admin);
        let mut directory = MockUserDirectory::new();
        directory.expect_find_by_id().returning(|_| Ok(None));
        let status = call(
            directory,
            Environment::Production,
            Some(SessionPayload::for_user(&user)),
            "/whoami",
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn lookup_failures_are_unauthorised() {
        let user = fixture_user("ada@example.com", Role::Admin);
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_| Err(Error::service_unavailable("pool exhausted")));
        let status = call(
            directory,
            Environment::Production,
            Some(SessionPayload::for_user(&user)),
            "/admin",
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[case(Environment::Development, StatusCode::OK)]
    #[case(Environment::Production, StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn development_guard_follows_environment(
        #[case] environment: Environment,
        #[case] expected: StatusCode,
    ) {
        let status = call(MockUserDirectory::new(), environment, None, "/dev").await;
        assert_eq!(status, expected);
    }
}
