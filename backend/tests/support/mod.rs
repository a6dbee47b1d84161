//! Shared helpers for integration tests that need a real PostgreSQL.
//!
//! Suites call [`temporary_store_database`] to get a freshly migrated
//! database on the process-wide embedded cluster. When the cluster cannot
//! start, [`handle_cluster_setup_failure`] applies the `SKIP_TEST_CLUSTER`
//! policy.

use exam_backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes"
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly so CI
/// breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create an empty database on the shared cluster and apply the embedded
/// migrations to it.
///
/// The database is dropped when the returned handle goes out of scope.
pub fn temporary_store_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let name = format!("test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate: {err}"))?;
    Ok(database)
}
