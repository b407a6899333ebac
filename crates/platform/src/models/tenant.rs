//! Tenant domain type.

use chrono::{DateTime, Utc};

use mangrove_core::{BusinessHours, HostName, TenantId, TenantSlug};

/// A storefront tenant (domain type).
///
/// Tenant rows are created and deactivated by the provisioning CLI; this core
/// only reads them. `id` never changes after creation, and at most one tenant
/// may hold a given custom domain or subdomain at any time (unique
/// constraints on both columns).
#[derive(Debug, Clone)]
pub struct Tenant {
    /// Stable internal identifier.
    pub id: TenantId,
    /// Unique, human-readable slug.
    pub slug: TenantSlug,
    /// Display name for the storefront.
    pub name: String,
    /// Fully-owned custom domain, if configured.
    pub custom_domain: Option<HostName>,
    /// Subdomain label under the shared parent domain, if configured.
    pub subdomain: Option<String>,
    /// Weekly opening hours.
    pub business_hours: BusinessHours,
    /// Inactive tenants resolve as not-found.
    pub is_active: bool,
    /// When the tenant was created.
    pub created_at: DateTime<Utc>,
    /// When the tenant was last updated.
    pub updated_at: DateTime<Utc>,
}
