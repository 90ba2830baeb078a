//! Identity resolution outcomes and the role authorization gate.
//!
//! Resolution turns a request's session into either an [`Identity`] or
//! [`Resolution::Anonymous`]; [`authorize`] then decides whether that outcome
//! may perform an operation requiring a given [`Role`]. Both are free of any
//! HTTP types so every transport can reuse them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Email, Error, Role, User, UserId};

/// Session payload written at sign-in and carried in the session cookie.
///
/// The role is a snapshot taken at sign-in; resolution always replaces it
/// with the persisted role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    #[schema(value_type = String)]
    pub user_id: UserId,
    #[schema(value_type = String)]
    pub email: Email,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl SessionPayload {
    /// Build the payload persisted for `user`.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: *user.id(),
            email: user.email().clone(),
            role: user.role(),
            access_token: None,
        }
    }
}

/// Resolved authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: UserId,
    email: Email,
    role: Role,
}

impl Identity {
    pub fn new(id: UserId, email: Email, role: Role) -> Self {
        Self { id, email, role }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), user.email().clone(), user.role())
    }
}

/// Outcome of resolving a request's session.
///
/// Absence of a session is a normal outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Authenticated(Identity),
    Anonymous,
}

impl Resolution {
    /// Borrow the identity when authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

/// Why the gate refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No identity was resolved (maps to 401).
    Unauthenticated,
    /// An identity was resolved but lacks the required role (maps to 403).
    Forbidden,
}

/// Gate decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(Identity),
    Deny(DenyReason),
}

impl Decision {
    /// Convert a decision into the permitted identity or a domain error.
    ///
    /// # Examples
    /// ```
    /// use arena_backend::domain::{authorize, ErrorCode, Resolution, Role};
    ///
    /// let err = authorize(Resolution::Anonymous, Role::Admin)
    ///     .into_result()
    ///     .unwrap_err();
    /// assert_eq!(err.code(), ErrorCode::Unauthorized);
    /// ```
    pub fn into_result(self) -> Result<Identity, Error> {
        match self {
            Self::Allow(identity) => Ok(identity),
            Self::Deny(DenyReason::Unauthenticated) => Err(Error::unauthorized("login required")),
            Self::Deny(DenyReason::Forbidden) => Err(Error::forbidden("insufficient role")),
        }
    }
}

/// Decide whether `resolution` may perform an operation requiring `required`.
pub fn authorize(resolution: Resolution, required: Role) -> Decision {
    match resolution {
        Resolution::Anonymous => Decision::Deny(DenyReason::Unauthenticated),
        Resolution::Authenticated(identity) if identity.role().satisfies(required) => {
            Decision::Allow(identity)
        }
        Resolution::Authenticated(_) => Decision::Deny(DenyReason::Forbidden),
    }
}

/// Type-level capability used to parameterise authorization extractors.
pub trait Capability: 'static {
    /// Minimum role holding this capability.
    const REQUIRED: Role;
}

/// Capability held by every signed-in user.
#[derive(Debug, Clone, Copy)]
pub struct MemberAccess;

/// Capability reserved for administrators.
#[derive(Debug, Clone, Copy)]
pub struct AdminAccess;

impl Capability for MemberAccess {
    const REQUIRED: Role = Role::Member;
}

impl Capability for AdminAccess {
    const REQUIRED: Role = Role::Admin;
}
