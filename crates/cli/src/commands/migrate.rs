//! Database migration command.
//!
//! Runs the platform schema migrations and then the session store's own
//! table setup. Migrations never run automatically on server startup.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use tower_sessions_sqlx_store::PostgresStore;

use super::CliError;

/// Run all database migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = super::connect().await?;

    tracing::info!("Running schema migrations...");
    sqlx::migrate!("../platform/migrations").run(&pool).await?;

    tracing::info!("Running session store migrations...");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .map_err(CliError::Database)?;

    tracing::info!("Migrations complete!");
    Ok(())
}
