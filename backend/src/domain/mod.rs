//! Domain primitives, the authorization gate and the services behind the
//! driving ports.
//!
//! Purpose: keep identity, role and participation rules free of transport
//! and storage concerns. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven `*Repository` ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: API error payload and stable code.
//! - [`User`], [`UserId`], [`Email`], [`Role`]: user identity and tiers.
//! - [`authorize`], [`Resolution`], [`Decision`]: the role gate.
//! - [`UserStats`], [`ApplicationCooldown`], [`CookieConsent`]: read models
//!   and records.

pub mod activity;
mod activity_service;
pub mod auth;
pub mod consent;
mod consent_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_directory;

pub use self::activity::{
    ApplicationCooldown, SignupActivity, SignupStatus, UnknownSignupStatus, UserStats,
};
pub use self::activity_service::{CooldownsService, UserStatsService};
pub use self::auth::{
    AdminAccess, Capability, Decision, DenyReason, Identity, MemberAccess, Resolution,
    SessionPayload, authorize,
};
pub use self::consent::{CookieConsent, UNKNOWN_CLIENT_ATTRIBUTE};
pub use self::consent_service::CookieConsentService;
pub use self::error::{Error, ErrorBody, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, Role, User, UserId, UserValidationError};
pub use self::user_directory::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use arena_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
