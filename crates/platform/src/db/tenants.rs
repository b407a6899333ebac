//! Tenant registry repository.
//!
//! Read-only from the platform's perspective: tenant rows are written by the
//! provisioning CLI. Inactive tenants are filtered out by every host-facing
//! lookup so a deactivated tenant is indistinguishable from one that never
//! existed.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use sqlx::PgPool;

use mangrove_core::{BusinessHours, HostName, TenantId, TenantSlug};

use super::RepositoryError;
use crate::models::Tenant;

const TENANT_COLUMNS: &str = "id, slug, name, custom_domain, subdomain, business_hours, \
                              is_active, created_at, updated_at";

/// Raw tenant row as stored.
#[derive(sqlx::FromRow)]
struct TenantRow {
    id: i32,
    slug: String,
    name: String,
    custom_domain: Option<String>,
    subdomain: Option<String>,
    business_hours: serde_json::Value,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TenantRow> for Tenant {
    type Error = RepositoryError;

    fn try_from(row: TenantRow) -> Result<Self, Self::Error> {
        let slug = TenantSlug::parse(&row.slug).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid slug in database: {e}"))
        })?;

        let business_hours: BusinessHours =
            serde_json::from_value(row.business_hours).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid business hours in database: {e}"))
            })?;

        Ok(Self {
            id: TenantId::new(row.id),
            slug,
            name: row.name,
            custom_domain: row.custom_domain.as_deref().map(HostName::normalize),
            subdomain: row.subdomain,
            business_hours,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for tenant registry operations.
pub struct TenantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TenantRepository<'a> {
    /// Create a new tenant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a tenant by its ID, active or not.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_by_id(&self, id: TenantId) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenant WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Tenant::try_from).transpose()
    }

    /// Get an active tenant by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_active_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenant WHERE slug = $1 AND is_active"
        ))
        .bind(slug.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Tenant::try_from).transpose()
    }

    /// Get an active tenant by exact custom-domain match.
    ///
    /// The stored domain is already normalized; callers pass a normalized
    /// [`HostName`] so the comparison is effectively case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_active_by_custom_domain(
        &self,
        host: &HostName,
    ) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenant WHERE custom_domain = $1 AND is_active"
        ))
        .bind(host.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Tenant::try_from).transpose()
    }

    /// Get an active tenant by subdomain label.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn get_active_by_subdomain(
        &self,
        label: &str,
    ) -> Result<Option<Tenant>, RepositoryError> {
        let row = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenant WHERE subdomain = $1 AND is_active"
        ))
        .bind(label)
        .fetch_optional(self.pool)
        .await?;

        row.map(Tenant::try_from).transpose()
    }

    /// List every tenant, active and inactive. Cross-tenant platform view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored field is invalid.
    pub async fn list_all(&self) -> Result<Vec<Tenant>, RepositoryError> {
        let rows = sqlx::query_as::<_, TenantRow>(&format!(
            "SELECT {TENANT_COLUMNS} FROM tenant ORDER BY slug"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Tenant::try_from).collect()
    }

    /// Get a named credential for one tenant.
    ///
    /// Credentials are only ever resolved per tenant, at the point of use.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_credential(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<Option<SecretString>, RepositoryError> {
        let secret: Option<String> = sqlx::query_scalar(
            "SELECT secret FROM tenant_credential WHERE tenant_id = $1 AND name = $2",
        )
        .bind(tenant_id.as_i32())
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(secret.map(SecretString::from))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row_with_hours(business_hours: serde_json::Value) -> TenantRow {
        TenantRow {
            id: 1,
            slug: "north-store".to_string(),
            name: "North Store".to_string(),
            custom_domain: None,
            subdomain: Some("north".to_string()),
            business_hours,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn freshly_provisioned_row_converts() {
        // The business_hours column default for tenants created without
        // explicit hours.
        let row = row_with_hours(serde_json::json!([null, null, null, null, null, null, null]));
        let tenant = Tenant::try_from(row).unwrap();
        assert_eq!(tenant.business_hours, BusinessHours::default());
    }

    #[test]
    fn malformed_stored_hours_is_data_corruption() {
        let row = row_with_hours(serde_json::json!({"open": "09:00"}));
        assert!(matches!(
            Tenant::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
