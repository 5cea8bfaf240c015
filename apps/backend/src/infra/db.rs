//! Database bootstrap: connect and migrate in one entrypoint.

use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile and run pending migrations.
///
/// The in-memory SQLite profile pins the pool to a single connection: every
/// pooled connection would otherwise see its own empty database, and an idle
/// reap would drop the data entirely.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;

    let mut opt = ConnectOptions::new(&url);
    if url.starts_with("sqlite::memory:") {
        opt.min_connections(1).max_connections(1);
    } else {
        opt.min_connections(1)
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5));
    }
    opt.sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .map_err(|e| AppError::config(format!("Failed to connect to database: {e}")))?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Failed to run migrations: {e}")))?;

    info!(profile = ?profile, "Database connected and migrated");
    Ok(conn)
}
