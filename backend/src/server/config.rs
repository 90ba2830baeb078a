//! Resolved server configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use arena_backend::inbound::http::session_config::SessionSettings;
use arena_backend::inbound::http::state::Environment;
use arena_backend::outbound::persistence::DbPool;

pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) environment: Environment,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr, environment: Environment) -> Self {
        let SessionSettings {
            key,
            cookie_secure,
            same_site,
        } = session;
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            environment,
            db_pool: None,
        }
    }

    /// Use PostgreSQL-backed repositories instead of the in-memory stores.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
