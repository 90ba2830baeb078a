//! Shared helpers for the Diesel adapter integration suites.
//!
//! Integration tests compile as separate crates, so each suite pulls this
//! module in with `mod support;`.

pub mod embedded_postgres;

pub use embedded_postgres::TestDatabase;

/// Render a `postgres` error with the SQLSTATE and server message.
///
/// `postgres::Error`'s `Display` collapses server errors to `db error`.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip or fail when the embedded cluster cannot start.
///
/// Returns `None` (and prints a skip marker) only when `SKIP_TEST_CLUSTER` is
/// set; otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
