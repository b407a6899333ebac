//! Tenant provisioning commands.
//!
//! # Usage
//!
//! ```bash
//! # Provision a tenant reachable at north.<parent domain>
//! mangrove tenant create -s north-store -n "North Store" --subdomain north
//!
//! # Attach a custom apex domain as well
//! mangrove tenant create -s south-store -n "South Store" \
//!     --custom-domain shop.south.example --subdomain south
//!
//! # Stop a tenant's hosts from resolving without deleting its data
//! mangrove tenant deactivate -s north-store
//!
//! # Store a per-tenant credential (value read from stdin)
//! echo -n "sk_live_..." | mangrove tenant set-credential \
//!     -s north-store -n payment_gateway --secret-stdin
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - `PostgreSQL` connection string

use std::io::Read;

use mangrove_core::{HostName, TenantSlug};
use secrecy::{ExposeSecret, SecretString};

use super::CliError;

/// Provision a new tenant.
///
/// # Returns
///
/// The ID of the created tenant.
pub async fn create(
    slug: &str,
    name: &str,
    custom_domain: Option<&str>,
    subdomain: Option<&str>,
) -> Result<i32, CliError> {
    let slug = TenantSlug::parse(slug).map_err(|e| CliError::InvalidSlug(e.to_string()))?;

    // Normalize the domain the same way request hosts are normalized, so the
    // stored value matches incoming traffic.
    let custom_domain = custom_domain.map(HostName::normalize);

    let subdomain = subdomain
        .map(TenantSlug::parse)
        .transpose()
        .map_err(|e| CliError::InvalidSlug(e.to_string()))?;

    let pool = super::connect().await?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM tenant WHERE slug = $1")
        .bind(slug.as_str())
        .fetch_optional(&pool)
        .await?;

    if existing.is_some() {
        return Err(CliError::AlreadyExists(format!("tenant '{slug}'")));
    }

    let tenant_id = sqlx::query_scalar::<_, i32>(
        r"
        INSERT INTO tenant (slug, name, custom_domain, subdomain)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        ",
    )
    .bind(slug.as_str())
    .bind(name)
    .bind(custom_domain.as_ref().map(HostName::as_str))
    .bind(subdomain.as_ref().map(TenantSlug::as_str))
    .fetch_one(&pool)
    .await?;

    tracing::info!(
        "Tenant created! ID: {}, slug: {}, custom domain: {}, subdomain: {}",
        tenant_id,
        slug,
        custom_domain.as_ref().map_or("-", HostName::as_str),
        subdomain.as_ref().map_or("-", TenantSlug::as_str),
    );

    Ok(tenant_id)
}

/// Deactivate a tenant.
///
/// Its hosts stop resolving immediately; data and credentials are kept.
pub async fn deactivate(slug: &str) -> Result<(), CliError> {
    let slug = TenantSlug::parse(slug).map_err(|e| CliError::InvalidSlug(e.to_string()))?;

    let pool = super::connect().await?;

    let updated = sqlx::query(
        "UPDATE tenant SET is_active = FALSE, updated_at = NOW() WHERE slug = $1",
    )
    .bind(slug.as_str())
    .execute(&pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(CliError::NotFound(format!("tenant '{slug}'")));
    }

    tracing::info!("Tenant '{}' deactivated", slug);
    Ok(())
}

/// Store or replace a per-tenant credential.
pub async fn set_credential(slug: &str, name: &str, secret: &SecretString) -> Result<(), CliError> {
    let slug = TenantSlug::parse(slug).map_err(|e| CliError::InvalidSlug(e.to_string()))?;

    let pool = super::connect().await?;

    let tenant_id = sqlx::query_scalar::<_, i32>("SELECT id FROM tenant WHERE slug = $1")
        .bind(slug.as_str())
        .fetch_optional(&pool)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("tenant '{slug}'")))?;

    sqlx::query(
        r"
        INSERT INTO tenant_credential (tenant_id, name, secret)
        VALUES ($1, $2, $3)
        ON CONFLICT (tenant_id, name)
        DO UPDATE SET secret = EXCLUDED.secret, updated_at = NOW()
        ",
    )
    .bind(tenant_id)
    .bind(name)
    .bind(secret.expose_secret())
    .execute(&pool)
    .await?;

    tracing::info!("Credential '{}' set for tenant '{}'", name, slug);
    Ok(())
}

/// Resolve the secret value from either stdin or the command line.
pub fn read_secret(from_stdin: bool, arg: Option<String>) -> Result<SecretString, CliError> {
    if from_stdin {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::SecretInput(e.to_string()))?;
        let trimmed = buf.trim_end_matches(['\r', '\n']);
        if trimmed.is_empty() {
            return Err(CliError::SecretInput("stdin was empty".to_owned()));
        }
        return Ok(SecretString::from(trimmed.to_owned()));
    }

    arg.map(SecretString::from)
        .ok_or_else(|| CliError::SecretInput("pass --secret or --secret-stdin".to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::read_secret;

    #[test]
    fn secret_argument_is_accepted() {
        let secret = read_secret(false, Some("sk_test_1234".to_owned())).unwrap();
        assert_eq!(secret.expose_secret(), "sk_test_1234");
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert!(read_secret(false, None).is_err());
    }
}
