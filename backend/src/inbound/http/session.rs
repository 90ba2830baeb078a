//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers and extractors only deal with the
//! [`SessionPayload`] written at sign-in.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SessionPayload};

pub(crate) const PAYLOAD_KEY: &str = "arena";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the payload for a freshly signed-in user.
    ///
    /// The session is renewed first so a pre-existing cookie cannot be reused
    /// across the sign-in boundary.
    pub fn persist_payload(&self, payload: &SessionPayload) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PAYLOAD_KEY, payload)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Read the session payload.
    ///
    /// A payload that no longer deserialises is treated as tampered: it is
    /// logged and reported as absent.
    pub fn payload(&self) -> Option<SessionPayload> {
        self.0
            .get::<SessionPayload>(PAYLOAD_KEY)
            .unwrap_or_else(|error| {
                warn!(%error, "discarding unreadable session payload");
                None
            })
    }

    /// Drop every key and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
