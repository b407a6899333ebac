//! Database operations for the platform `PostgreSQL`.
//!
//! # Database: `mangrove_platform`
//!
//! ## Tables
//!
//! - `tenant` - Tenant registry rows (domains, hours, active flag)
//! - `tenant_credential` - Per-tenant third-party secrets
//! - `actor` - Authenticated actors
//! - `actor_tenant_role` - Per-tenant role grants
//! - `tenant_order` - Tenant-owned orders (scoped accessor demo aggregate)
//! - `session` - Tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/platform/migrations/` and run via:
//! ```bash
//! cargo run -p mangrove-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod orders;
pub mod tenants;

pub use orders::OrderRepository;
pub use tenants::TenantRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value failed domain validation on the way out.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// A write was attempted without a tenant-bound scope filter.
    ///
    /// Inserts must stamp the owning tenant; an unrestricted filter on a
    /// write path is a programming error at the call site.
    #[error("write attempted without a tenant-bound scope filter")]
    UnscopedWrite,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
