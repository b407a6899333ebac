//! CLI command implementations.

pub mod actor;
pub mod migrate;
pub mod tenant;

/// Connect to the platform database using `DATABASE_URL`.
pub(crate) async fn connect() -> Result<sqlx::PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| CliError::MissingEnvVar("DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(sqlx::PgPool::connect(&database_url).await?)
}

/// Errors shared across CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid slug.
    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: admin, viewer")]
    InvalidRole(String),

    /// Referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Record already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Secret input problem.
    #[error("Secret input error: {0}")]
    SecretInput(String),
}
