//! Embedded PostgreSQL databases for adapter tests.
//!
//! Every test gets its own database cloned from a template that already has
//! the crate's migrations applied. The template name carries a hash of the
//! migrations directory, so schema edits produce a fresh template.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use arena_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_NAME_PREFIX: &str = "arena_template";

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_NAME_PREFIX}_{short_hash}"))
}

/// Create the migrated template once per cluster.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template_name);
        run_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template_name)
}

/// A migrated, throwaway database with a pool and a runtime to drive it.
///
/// Fields drop in order: the pool closes before the database is removed.
pub struct TestDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    url: String,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn new() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let cluster = shared_cluster_handle().map_err(|err| format!("{err:?}"))?;
        let template_name = ensure_template_database(cluster)?;
        let database = cluster
            .temporary_database_from_template(
                format!("test_{}", Uuid::new_v4().simple()).as_str(),
                template_name.as_str(),
            )
            .map_err(|err| format!("create database from template: {err:?}"))?;
        let url = database.url().to_string();

        let config = PoolConfig::new(url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            pool,
            runtime,
            url,
            _database: database,
        })
    }

    /// Synchronous client for seeding rows and reading them back.
    pub fn client(&self) -> Client {
        Client::connect(self.url.as_str(), NoTls).unwrap_or_else(|err| {
            panic!("connect to test database: {}", format_postgres_error(&err))
        })
    }

    /// Run one statement, panicking with the server's message on failure.
    pub fn execute(&self, sql: &str, params: &[&(dyn postgres::types::ToSql + Sync)]) -> u64 {
        self.client()
            .execute(sql, params)
            .unwrap_or_else(|err| panic!("{sql}: {}", format_postgres_error(&err)))
    }
}
