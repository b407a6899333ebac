//! Tenant-namespaced cache.
//!
//! Wraps `moka` so namespacing happens inside the cache type itself; a call
//! site cannot reintroduce a cross-tenant collision by forgetting a prefix.
//! Physical keys are `tenant:{id}:{logical}` or `shared:{logical}`. The
//! cache is a performance optimization, never a source of truth: every miss
//! degrades to recomputation by the caller.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use mangrove_core::{AuthorizationContext, TenantId};

/// TTL for tenant-namespaced entries (branding, hours text, computed pages).
const TENANT_TTL: Duration = Duration::from_secs(300);

/// TTL for shared entries (artifacts identical across tenants, e.g. a product
/// photograph keyed by product id). Longer, since they change less often and
/// are reused by every tenant.
const SHARED_TTL: Duration = Duration::from_secs(3600);

const MAX_CAPACITY: u64 = 10_000;

/// A shared cache with per-tenant namespacing.
///
/// Internally two `moka` caches (tenant-namespaced and shared) so the two
/// namespaces carry different TTLs and per-tenant invalidation can never
/// touch a `shared:*` entry.
#[derive(Clone)]
pub struct TenantCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    tenant_entries: Cache<String, V>,
    shared_entries: Cache<String, V>,
}

impl<V> TenantCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache with the default TTLs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tenant_entries: Cache::builder()
                .max_capacity(MAX_CAPACITY)
                .time_to_live(TENANT_TTL)
                .support_invalidation_closures()
                .build(),
            shared_entries: Cache::builder()
                .max_capacity(MAX_CAPACITY)
                .time_to_live(SHARED_TTL)
                .build(),
        }
    }

    /// Look up a logical key under the context's namespace.
    ///
    /// Denied contexts and contexts with no bound tenant read as a miss, as
    /// does any backend trouble; the caller recomputes directly.
    pub async fn get(
        &self,
        ctx: &AuthorizationContext,
        logical_key: &str,
        shared_across_tenants: bool,
    ) -> Option<V> {
        if shared_across_tenants {
            return self.shared_entries.get(&shared_key(logical_key)).await;
        }

        if !ctx.is_allowed() {
            return None;
        }
        let tenant_id = ctx.tenant_id()?;
        self.tenant_entries
            .get(&tenant_key(tenant_id, logical_key))
            .await
    }

    /// Store a value under the context's namespace.
    ///
    /// Writes from denied contexts are dropped silently, shared namespace
    /// included; so are tenant writes from unbound contexts. The cache is
    /// fail-open in both directions.
    pub async fn insert(
        &self,
        ctx: &AuthorizationContext,
        logical_key: &str,
        value: V,
        shared_across_tenants: bool,
    ) {
        if !ctx.is_allowed() {
            return;
        }

        if shared_across_tenants {
            self.shared_entries
                .insert(shared_key(logical_key), value)
                .await;
            return;
        }
        let Some(tenant_id) = ctx.tenant_id() else {
            return;
        };
        self.tenant_entries
            .insert(tenant_key(tenant_id, logical_key), value)
            .await;
    }

    /// Invalidate every entry under one tenant's namespace whose logical key
    /// starts with `key_prefix` (empty prefix clears the whole namespace).
    ///
    /// Only ever matches that tenant's namespace - never `shared:*`, never a
    /// sibling tenant's entries - so one tenant's cache-busting action cannot
    /// evict data other tenants depend on.
    pub fn invalidate(&self, tenant_id: TenantId, key_prefix: &str) {
        let physical_prefix = tenant_key(tenant_id, key_prefix);
        if let Err(err) = self
            .tenant_entries
            .invalidate_entries_if(move |key, _| key.starts_with(&physical_prefix))
        {
            // Fail-open: stale entries age out via TTL.
            debug!(tenant_id = %tenant_id, error = %err, "cache invalidation unavailable");
        }
    }
}

impl<V> Default for TenantCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

fn tenant_key(tenant_id: TenantId, logical_key: &str) -> String {
    format!("tenant:{tenant_id}:{logical_key}")
}

fn shared_key(logical_key: &str) -> String {
    format!("shared:{logical_key}")
}
