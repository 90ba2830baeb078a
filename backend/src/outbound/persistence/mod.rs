//! PostgreSQL adapters for the domain's driven ports.
//!
//! Adapters are thin: they translate between the row structs in `models`
//! and domain types and map every database failure onto the port's error
//! enum. Connections come from a shared `bb8` pool via `diesel-async`.
//!
//! ```ignore
//! use arena_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/arena")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_cookie_consent_repository;
mod diesel_cooldown_repository;
mod diesel_signup_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cookie_consent_repository::DieselCookieConsentRepository;
pub use diesel_cooldown_repository::DieselCooldownRepository;
pub use diesel_signup_repository::DieselSignupRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
