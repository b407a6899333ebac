//! Host-based tenant resolution.
//!
//! Precedence is load-bearing and evaluated top to bottom, first match wins:
//!
//! 1. Developer override slug (local mode only)
//! 2. Exact custom-domain match
//! 3. Subdomain label under the shared parent domain
//! 4. Bare local host falls back to the configured default tenant
//! 5. Not found
//!
//! Custom domains must win over subdomain matching so a tenant holding both
//! is never ambiguously resolved behind a reverse proxy. Hostnames are
//! compared case-insensitively after normalization; there is no fuzzy
//! matching anywhere.

use tracing::debug;

use mangrove_core::{HostName, TenantSlug};

use super::registry::TenantRegistry;
use crate::models::Tenant;

/// Resolves inbound hosts to tenants through a [`TenantRegistry`].
pub struct TenantResolver<R> {
    registry: R,
    parent_domain: String,
    default_tenant: TenantSlug,
    local_mode: bool,
}

impl<R: TenantRegistry> TenantResolver<R> {
    /// Create a resolver.
    ///
    /// `parent_domain` is the shared domain under which tenant subdomains
    /// live; `default_tenant` is the slug used for bare local hosts;
    /// `local_mode` gates the developer override (read once from config).
    #[must_use]
    pub const fn new(
        registry: R,
        parent_domain: String,
        default_tenant: TenantSlug,
        local_mode: bool,
    ) -> Self {
        Self {
            registry,
            parent_domain,
            default_tenant,
            local_mode,
        }
    }

    /// Resolve a normalized host (and optional developer override) to a
    /// tenant. Returns `None` for unknown and inactive hosts alike.
    pub async fn resolve(
        &self,
        host: &HostName,
        dev_override: Option<&TenantSlug>,
    ) -> Option<Tenant> {
        // 1. Developer override, only honored in local mode.
        if self.local_mode
            && let Some(slug) = dev_override
        {
            if let Some(tenant) = self.registry.tenant_by_slug(slug).await {
                debug!(host = %host, tenant = %tenant.slug, "resolved via dev override");
                return Some(tenant);
            }
            // An override naming an unknown tenant falls through to host
            // matching rather than masking it.
        }

        // 2. Custom domain wins over subdomain matching.
        if let Some(tenant) = self.registry.tenant_by_custom_domain(host).await {
            debug!(host = %host, tenant = %tenant.slug, "resolved via custom domain");
            return Some(tenant);
        }

        // 3. Leftmost label under the shared parent domain.
        if let Some((label, rest)) = host.split_first_label()
            && rest == self.parent_domain
            && let Some(tenant) = self.registry.tenant_by_subdomain(label).await
        {
            debug!(host = %host, tenant = %tenant.slug, "resolved via subdomain");
            return Some(tenant);
        }

        // 4. Bare local hosts and the bare parent domain fall back to the
        // default tenant.
        if host.is_local_host() || host.as_str() == self.parent_domain {
            if let Some(tenant) = self.registry.tenant_by_slug(&self.default_tenant).await {
                debug!(host = %host, tenant = %tenant.slug, "resolved via default tenant");
                return Some(tenant);
            }
        }

        // 5. Not found.
        debug!(host = %host, "no tenant resolved");
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use mangrove_core::{BusinessHours, TenantId};

    use super::*;
    use crate::tenancy::registry::testing::InMemoryRegistry;

    pub(crate) fn tenant(
        id: i32,
        slug: &str,
        custom_domain: Option<&str>,
        subdomain: Option<&str>,
    ) -> Tenant {
        Tenant {
            id: TenantId::new(id),
            slug: TenantSlug::parse(slug).unwrap(),
            name: slug.to_string(),
            custom_domain: custom_domain.map(HostName::normalize),
            subdomain: subdomain.map(str::to_string),
            business_hours: BusinessHours::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn resolver(tenants: Vec<Tenant>, local_mode: bool) -> TenantResolver<InMemoryRegistry> {
        TenantResolver::new(
            InMemoryRegistry::with_tenants(tenants),
            "example.com".to_string(),
            TenantSlug::parse("north-store").unwrap(),
            local_mode,
        )
    }

    fn fixture() -> Vec<Tenant> {
        vec![
            // north-store owns a custom domain and a subdomain
            tenant(1, "north-store", Some("north.example.com"), Some("north")),
            tenant(2, "south-store", None, Some("south")),
        ]
    }

    #[tokio::test]
    async fn custom_domain_resolves() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("north.example.com");
        let found = r.resolve(&host, None).await.unwrap();
        assert_eq!(found.id, TenantId::new(1));
    }

    #[tokio::test]
    async fn custom_domain_wins_over_subdomain_of_sibling() {
        // north.example.com is tenant 1's custom domain even though "north"
        // is also a subdomain label under the parent domain.
        let r = resolver(fixture(), false);
        let host = HostName::normalize("North.Example.com:443");
        let found = r.resolve(&host, None).await.unwrap();
        assert_eq!(found.id, TenantId::new(1));
    }

    #[tokio::test]
    async fn subdomain_resolves_under_parent_domain() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("south.example.com");
        let found = r.resolve(&host, None).await.unwrap();
        assert_eq!(found.id, TenantId::new(2));
    }

    #[tokio::test]
    async fn subdomain_never_cross_resolves_to_sibling() {
        let r = resolver(fixture(), false);
        let south = HostName::normalize("south.example.com");
        let north = HostName::normalize("north.example.com");
        assert_eq!(r.resolve(&south, None).await.unwrap().id, TenantId::new(2));
        assert_eq!(r.resolve(&north, None).await.unwrap().id, TenantId::new(1));
    }

    #[tokio::test]
    async fn subdomain_of_other_parent_does_not_resolve() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("south.other.com");
        assert!(r.resolve(&host, None).await.is_none());
    }

    #[tokio::test]
    async fn bare_parent_domain_falls_back_to_default() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("example.com");
        let found = r.resolve(&host, None).await.unwrap();
        assert_eq!(found.id, TenantId::new(1));
    }

    #[tokio::test]
    async fn localhost_falls_back_to_default() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("localhost:3000");
        let found = r.resolve(&host, None).await.unwrap();
        assert_eq!(found.id, TenantId::new(1));
    }

    #[tokio::test]
    async fn unknown_subdomain_is_not_found() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("unknown.example.com");
        assert!(r.resolve(&host, None).await.is_none());
    }

    #[tokio::test]
    async fn inactive_tenant_is_not_found() {
        let mut tenants = fixture();
        if let Some(t) = tenants.get_mut(1) {
            t.is_active = false;
        }
        let r = resolver(tenants, false);
        let host = HostName::normalize("south.example.com");
        assert!(r.resolve(&host, None).await.is_none());
    }

    #[tokio::test]
    async fn dev_override_wins_in_local_mode() {
        let r = resolver(fixture(), true);
        let host = HostName::normalize("north.example.com");
        let slug = TenantSlug::parse("south-store").unwrap();
        let found = r.resolve(&host, Some(&slug)).await.unwrap();
        assert_eq!(found.id, TenantId::new(2));
    }

    #[tokio::test]
    async fn dev_override_ignored_outside_local_mode() {
        let r = resolver(fixture(), false);
        let host = HostName::normalize("north.example.com");
        let slug = TenantSlug::parse("south-store").unwrap();
        let found = r.resolve(&host, Some(&slug)).await.unwrap();
        assert_eq!(found.id, TenantId::new(1));
    }

    #[tokio::test]
    async fn unknown_override_falls_through_to_host() {
        let r = resolver(fixture(), true);
        let host = HostName::normalize("south.example.com");
        let slug = TenantSlug::parse("missing-store").unwrap();
        let found = r.resolve(&host, Some(&slug)).await.unwrap();
        assert_eq!(found.id, TenantId::new(2));
    }
}
