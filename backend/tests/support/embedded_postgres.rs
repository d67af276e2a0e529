//! Per-test databases on an embedded cluster.
//!
//! Databases are created with `postgres` rather than Diesel so `CREATE
//! DATABASE` runs outside any transaction. The schema comes from the crate's
//! own migration runner.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use punchclock::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

const MAINTENANCE_DB: &str = "postgres";

/// Create an empty, uniquely named database and return its URL.
pub fn create_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("punchclock_test_{}", Uuid::new_v4().simple());
    let admin_url = cluster.connection().database_url(MAINTENANCE_DB);
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\";"))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(&name))
}

/// Create a database and bring it to the latest schema.
pub fn migrated_database(cluster: &TestCluster, runtime: &Runtime) -> Result<String, String> {
    let url = create_database(cluster)?;
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(url)
}
