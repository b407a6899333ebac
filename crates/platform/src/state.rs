//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::PlatformConfig;
use crate::tenancy::{
    AuthzBuilder, CredentialInjector, PgTenantRegistry, TenantCache, TenantResolver,
};

/// Cached value type for per-tenant computed payloads.
pub type PageCache = TenantCache<Arc<serde_json::Value>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: PlatformConfig,
    pool: PgPool,
    resolver: TenantResolver<PgTenantRegistry>,
    authz: AuthzBuilder,
    cache: PageCache,
    credentials: CredentialInjector<PgTenantRegistry>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Mode flags (local mode, auth bypass) are consumed here, once; nothing
    /// downstream re-reads the environment per request.
    #[must_use]
    pub fn new(config: PlatformConfig, pool: PgPool) -> Self {
        let registry = PgTenantRegistry::new(pool.clone());
        let resolver = TenantResolver::new(
            registry.clone(),
            config.parent_domain.clone(),
            config.default_tenant.clone(),
            config.local_mode,
        );
        let authz = AuthzBuilder::new(config.auth_bypass);
        let credentials = CredentialInjector::new(registry);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                resolver,
                authz,
                cache: TenantCache::new(),
                credentials,
            }),
        }
    }

    /// Get a reference to the platform configuration.
    #[must_use]
    pub fn config(&self) -> &PlatformConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the tenant resolver.
    #[must_use]
    pub fn resolver(&self) -> &TenantResolver<PgTenantRegistry> {
        &self.inner.resolver
    }

    /// Get the authorization context builder.
    #[must_use]
    pub fn authz(&self) -> AuthzBuilder {
        self.inner.authz
    }

    /// Get a reference to the tenant-namespaced cache.
    #[must_use]
    pub fn cache(&self) -> &PageCache {
        &self.inner.cache
    }

    /// Get a reference to the credential injector.
    #[must_use]
    pub fn credentials(&self) -> &CredentialInjector<PgTenantRegistry> {
        &self.inner.credentials
    }
}
