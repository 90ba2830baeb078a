//! Backend entry point: loads settings, prepares persistence and serves HTTP.

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use arena_backend::inbound::http::health::HealthState;
use arena_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use arena_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use arena_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};

use server::{ServerConfig, ServerSettings, create_server, drain, shutdown_signal};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect_database(url: String, max_connections: u32) -> io::Result<DbPool> {
    let migration_url = url.clone();
    let applied = tokio::task::spawn_blocking(move || run_migrations(&migration_url))
        .await
        .map_err(io::Error::other)?
        .map_err(io::Error::other)?;
    info!(applied, "database migrations complete");

    DbPool::new(PoolConfig::new(url).with_max_size(max_connections))
        .await
        .map_err(io::Error::other)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let environment = settings.environment().map_err(io::Error::other)?;
    let database_url = settings
        .database_url_for(environment)
        .map_err(io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        cookie_secure = session.cookie_secure,
        "session key loaded"
    );

    let mut config = ServerConfig::new(session, bind_addr, environment);
    if let Some(url) = database_url {
        let pool = connect_database(url.to_owned(), settings.db_max_connections()).await?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, %environment, "starting server");
    let server = create_server(health_state.clone(), config)?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        drain(&health_state, &handle).await;
    });
    server.await
}
