//! Assemble [`HttpState`] from either Diesel adapters or in-memory stores.

use std::sync::Arc;

use chrono::Utc;
use mockable::{Clock, DefaultClock};
use tracing::info;

use arena_backend::domain::ports::{
    CookieConsentRepository, CooldownRepository, FixtureCooldownRepository,
    FixtureSignupRepository, InMemoryCookieConsentRepository, InMemoryUserRepository,
    SignupRepository, UserRepository,
};
use arena_backend::domain::{
    CookieConsentService, CooldownsService, Email, Role, User, UserDirectoryService, UserId,
    UserStatsService,
};
use arena_backend::inbound::http::state::{Environment, HttpState};
use arena_backend::outbound::persistence::{
    DbPool, DieselCookieConsentRepository, DieselCooldownRepository, DieselSignupRepository,
    DieselUserRepository,
};

use super::ServerConfig;

const DEV_USERS: [(&str, &str, Role); 2] = [
    ("admin@arena.test", "arena-admin", Role::Admin),
    ("player@arena.test", "arena-player", Role::Member),
];

struct Repositories {
    users: Arc<dyn UserRepository>,
    consents: Arc<dyn CookieConsentRepository>,
    signups: Arc<dyn SignupRepository>,
    cooldowns: Arc<dyn CooldownRepository>,
}

fn diesel_repositories(pool: &DbPool) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        consents: Arc::new(DieselCookieConsentRepository::new(pool.clone())),
        signups: Arc::new(DieselSignupRepository::new(pool.clone())),
        cooldowns: Arc::new(DieselCooldownRepository::new(pool.clone())),
    }
}

/// Users available to the development sign-in when no database is attached.
fn dev_users() -> Vec<User> {
    DEV_USERS
        .iter()
        .filter_map(|(email, username, role)| {
            let email = Email::new(email).ok()?;
            User::new(UserId::random(), email, *username, *role, Utc::now()).ok()
        })
        .collect()
}

fn in_memory_repositories() -> Repositories {
    let users = dev_users();
    info!(
        seeded = users.len(),
        "no database configured; using in-memory stores"
    );
    Repositories {
        users: Arc::new(InMemoryUserRepository::with_users(users)),
        consents: Arc::new(InMemoryCookieConsentRepository::default()),
        signups: Arc::new(FixtureSignupRepository),
        cooldowns: Arc::new(FixtureCooldownRepository),
    }
}

fn assemble(repos: Repositories, environment: Environment) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    HttpState {
        users: Arc::new(UserDirectoryService::new(repos.users)),
        consents: Arc::new(CookieConsentService::new(repos.consents)),
        stats: Arc::new(UserStatsService::new(repos.signups, Arc::clone(&clock))),
        cooldowns: Arc::new(CooldownsService::new(repos.cooldowns, clock)),
        environment,
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let repos = match &config.db_pool {
        Some(pool) => diesel_repositories(pool),
        None => in_memory_repositories(),
    };
    assemble(repos, config.environment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_backend::domain::ports::UserDirectory;
    use rstest::rstest;

    #[rstest]
    fn dev_users_cover_both_roles() {
        let users = dev_users();
        assert_eq!(users.len(), DEV_USERS.len());
        assert!(users.iter().any(|user| user.role() == Role::Admin));
        assert!(users.iter().any(|user| user.role() == Role::Member));
    }

    #[rstest]
    #[tokio::test]
    async fn in_memory_state_resolves_seeded_users() {
        let state = assemble(in_memory_repositories(), Environment::Development);
        let email = Email::new("admin@arena.test").expect("email");
        let user = state
            .users
            .find_by_email(&email)
            .await
            .expect("lookup succeeds")
            .expect("seeded admin");
        assert_eq!(user.role(), Role::Admin);
        assert!(state.environment.is_development());
    }
}
