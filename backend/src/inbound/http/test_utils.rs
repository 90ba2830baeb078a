//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ConsentLedger, CooldownsQuery, MockConsentLedger, MockCooldownsQuery, MockUserDirectory,
    MockUserStatsQuery, UserDirectory, UserStatsQuery,
};
use crate::domain::{Email, Error, Role, SessionPayload, User, UserId};

use super::session::SessionContext;
use super::state::{Environment, HttpState};

pub(crate) const SESSION_COOKIE: &str = "session";

/// Route serving [`plant_session`] in handler tests.
pub const PLANT_SESSION_PATH: &str = "/test/session";

/// Build a session middleware configured for tests.
///
/// A fresh key is generated per invocation and the `Secure` flag is disabled
/// for plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// Pull the session cookie out of a response.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Test-only handler writing the posted payload into the session.
pub async fn plant_session(
    session: SessionContext,
    body: web::Json<SessionPayload>,
) -> Result<HttpResponse, Error> {
    session.persist_payload(&body.into_inner())?;
    Ok(HttpResponse::Ok().finish())
}

/// Request planting `payload` through [`plant_session`].
pub fn plant_session_request(payload: &SessionPayload) -> test::TestRequest {
    test::TestRequest::post()
        .uri(PLANT_SESSION_PATH)
        .set_json(payload)
}

/// Build a valid user for handler tests.
pub fn fixture_user(email: &str, role: Role) -> User {
    User::new(
        UserId::random(),
        Email::new(email).expect("fixture email"),
        email.split('@').next().unwrap_or("player"),
        role,
        DateTime::<Utc>::UNIX_EPOCH,
    )
    .expect("fixture user")
}

/// Builder over [`HttpState`] with mock ports that fail any unexpected call.
pub struct TestState {
    pub users: Arc<dyn UserDirectory>,
    pub consents: Arc<dyn ConsentLedger>,
    pub stats: Arc<dyn UserStatsQuery>,
    pub cooldowns: Arc<dyn CooldownsQuery>,
    pub environment: Environment,
}

impl Default for TestState {
    fn default() -> Self {
        Self {
            users: Arc::new(MockUserDirectory::new()),
            consents: Arc::new(MockConsentLedger::new()),
            stats: Arc::new(MockUserStatsQuery::new()),
            cooldowns: Arc::new(MockCooldownsQuery::new()),
            environment: Environment::Production,
        }
    }
}

impl TestState {
    pub fn build(self) -> HttpState {
        HttpState {
            users: self.users,
            consents: self.consents,
            stats: self.stats,
            cooldowns: self.cooldowns,
            environment: self.environment,
        }
    }
}
