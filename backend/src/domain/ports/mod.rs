//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters and
//! report adapter-specific errors; driving ports are implemented by domain
//! services and report [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod consent_ledger;
mod cookie_consent_repository;
mod cooldown_repository;
mod cooldowns_query;
mod signup_repository;
mod user_directory;
mod user_repository;
mod user_stats_query;

#[cfg(test)]
pub use consent_ledger::MockConsentLedger;
pub use consent_ledger::ConsentLedger;
#[cfg(test)]
pub use cookie_consent_repository::MockCookieConsentRepository;
pub use cookie_consent_repository::{
    CookieConsentRepository, CookieConsentRepositoryError, InMemoryCookieConsentRepository,
};
#[cfg(test)]
pub use cooldown_repository::MockCooldownRepository;
pub use cooldown_repository::{
    CooldownRepository, CooldownRepositoryError, FixtureCooldownRepository,
};
#[cfg(test)]
pub use cooldowns_query::MockCooldownsQuery;
pub use cooldowns_query::CooldownsQuery;
#[cfg(test)]
pub use signup_repository::MockSignupRepository;
pub use signup_repository::{FixtureSignupRepository, SignupRepository, SignupRepositoryError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{InMemoryUserRepository, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use user_stats_query::MockUserStatsQuery;
pub use user_stats_query::UserStatsQuery;
