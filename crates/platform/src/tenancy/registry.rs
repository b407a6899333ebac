//! Tenant registry lookup primitive.
//!
//! The registry is the only shared read path the resolver and credential
//! injector depend on. Lookups are bounded by a short timeout and fail toward
//! not-found rather than blocking a request on a slow backend.

use std::time::Duration;

use secrecy::SecretString;
use sqlx::PgPool;
use tracing::warn;

use mangrove_core::{HostName, TenantId, TenantSlug};

use crate::db::{RepositoryError, TenantRepository};
use crate::models::Tenant;

/// Upper bound on a single registry lookup.
const LOOKUP_TIMEOUT: Duration = Duration::from_millis(500);

/// Lookup primitive over the tenant registry.
///
/// Implementations must be safe for concurrent use from many in-flight
/// requests; every method degrades to `None` on backend trouble.
pub trait TenantRegistry: Send + Sync {
    /// Active tenant by slug.
    fn tenant_by_slug(
        &self,
        slug: &TenantSlug,
    ) -> impl Future<Output = Option<Tenant>> + Send;

    /// Active tenant by exact custom-domain match.
    fn tenant_by_custom_domain(
        &self,
        host: &HostName,
    ) -> impl Future<Output = Option<Tenant>> + Send;

    /// Active tenant by subdomain label.
    fn tenant_by_subdomain(&self, label: &str) -> impl Future<Output = Option<Tenant>> + Send;

    /// Tenant by ID, active or not (used by the cross-tenant platform view).
    fn tenant_by_id(&self, id: TenantId) -> impl Future<Output = Option<Tenant>> + Send;

    /// Named credential for one tenant.
    fn credential(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> impl Future<Output = Option<SecretString>> + Send;
}

/// `PostgreSQL`-backed tenant registry.
#[derive(Clone)]
pub struct PgTenantRegistry {
    pool: PgPool,
}

impl PgTenantRegistry {
    /// Create a registry over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run one bounded lookup, mapping timeouts and errors to `None`.
    async fn bounded<T>(
        &self,
        what: &'static str,
        fut: impl Future<Output = Result<Option<T>, RepositoryError>>,
    ) -> Option<T> {
        match tokio::time::timeout(LOOKUP_TIMEOUT, fut).await {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => {
                warn!(lookup = what, error = %err, "registry lookup failed");
                None
            }
            Err(_) => {
                warn!(lookup = what, "registry lookup timed out");
                None
            }
        }
    }
}

impl TenantRegistry for PgTenantRegistry {
    async fn tenant_by_slug(&self, slug: &TenantSlug) -> Option<Tenant> {
        let repo = TenantRepository::new(&self.pool);
        self.bounded("tenant_by_slug", repo.get_active_by_slug(slug))
            .await
    }

    async fn tenant_by_custom_domain(&self, host: &HostName) -> Option<Tenant> {
        let repo = TenantRepository::new(&self.pool);
        self.bounded(
            "tenant_by_custom_domain",
            repo.get_active_by_custom_domain(host),
        )
        .await
    }

    async fn tenant_by_subdomain(&self, label: &str) -> Option<Tenant> {
        let repo = TenantRepository::new(&self.pool);
        self.bounded("tenant_by_subdomain", repo.get_active_by_subdomain(label))
            .await
    }

    async fn tenant_by_id(&self, id: TenantId) -> Option<Tenant> {
        let repo = TenantRepository::new(&self.pool);
        self.bounded("tenant_by_id", repo.get_by_id(id)).await
    }

    async fn credential(&self, tenant_id: TenantId, name: &str) -> Option<SecretString> {
        let repo = TenantRepository::new(&self.pool);
        self.bounded("credential", repo.get_credential(tenant_id, name))
            .await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory registry for resolver and credential tests.

    use std::collections::HashMap;

    use super::*;

    /// Fixed in-memory tenant set.
    #[derive(Default)]
    pub struct InMemoryRegistry {
        tenants: Vec<Tenant>,
        credentials: HashMap<(i32, String), String>,
    }

    impl InMemoryRegistry {
        pub fn with_tenants(tenants: Vec<Tenant>) -> Self {
            Self {
                tenants,
                credentials: HashMap::new(),
            }
        }

        pub fn add_credential(&mut self, tenant_id: TenantId, name: &str, secret: &str) {
            self.credentials
                .insert((tenant_id.as_i32(), name.to_string()), secret.to_string());
        }

        fn active(&self) -> impl Iterator<Item = &Tenant> {
            self.tenants.iter().filter(|t| t.is_active)
        }
    }

    impl TenantRegistry for InMemoryRegistry {
        async fn tenant_by_slug(&self, slug: &TenantSlug) -> Option<Tenant> {
            self.active().find(|t| &t.slug == slug).cloned()
        }

        async fn tenant_by_custom_domain(&self, host: &HostName) -> Option<Tenant> {
            self.active()
                .find(|t| t.custom_domain.as_ref() == Some(host))
                .cloned()
        }

        async fn tenant_by_subdomain(&self, label: &str) -> Option<Tenant> {
            self.active()
                .find(|t| t.subdomain.as_deref() == Some(label))
                .cloned()
        }

        async fn tenant_by_id(&self, id: TenantId) -> Option<Tenant> {
            self.tenants.iter().find(|t| t.id == id).cloned()
        }

        async fn credential(&self, tenant_id: TenantId, name: &str) -> Option<SecretString> {
            self.credentials
                .get(&(tenant_id.as_i32(), name.to_string()))
                .map(|s| SecretString::from(s.clone()))
        }
    }
}
