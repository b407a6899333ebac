//! Actor management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create an operator with the cross-tenant capability
//! mangrove actor create -e ops@example.com -n "Ops" --super-admin
//!
//! # Create a regular actor and grant them a tenant role
//! mangrove actor create -e alice@example.com -n "Alice"
//! mangrove actor grant -e alice@example.com -s north-store -r admin
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use mangrove_core::{Email, TenantRole, TenantSlug};

use super::CliError;

/// Create a new actor.
///
/// # Returns
///
/// The ID of the created actor.
pub async fn create(email: &str, name: &str, super_admin: bool) -> Result<i32, CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;

    let pool = super::connect().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM actor WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(CliError::AlreadyExists(format!("actor '{email}'")));
    }

    let actor_id = sqlx::query_scalar::<_, i32>(
        r"
        INSERT INTO actor (email, display_name, is_super_admin)
        VALUES ($1, $2, $3)
        RETURNING id
        ",
    )
    .bind(email.as_str())
    .bind(name)
    .bind(super_admin)
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Actor created! ID: {}, email: {}, super admin: {}",
        actor_id,
        email,
        super_admin
    );

    if super_admin {
        tracing::warn!("This actor can read data across every tenant. Grant sparingly.");
    }

    Ok(actor_id)
}

/// Grant an actor a role within a tenant.
pub async fn grant(email: &str, slug: &str, role: &str) -> Result<(), CliError> {
    let email = Email::parse(email).map_err(|e| CliError::InvalidEmail(e.to_string()))?;
    let slug = TenantSlug::parse(slug).map_err(|e| CliError::InvalidSlug(e.to_string()))?;
    let role: TenantRole = role
        .parse()
        .map_err(|_| CliError::InvalidRole(role.to_owned()))?;

    let pool = super::connect().await?;

    let actor_id = sqlx::query_scalar::<_, i32>("SELECT id FROM actor WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("actor '{email}'")))?;

    let tenant_id = sqlx::query_scalar::<_, i32>("SELECT id FROM tenant WHERE slug = $1")
        .bind(slug.as_str())
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("tenant '{slug}'")))?;

    sqlx::query(
        r"
        INSERT INTO actor_tenant_role (actor_id, tenant_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (actor_id, tenant_id)
        DO UPDATE SET role = EXCLUDED.role
        ",
    )
    .bind(actor_id)
    .bind(tenant_id)
    .bind(role.to_string())
    .execute(&pool)
    .await?;

    tracing::info!("Granted '{}' to {} on tenant '{}'", role, email, slug);
    Ok(())
}
