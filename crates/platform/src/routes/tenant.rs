//! Tenant-scoped profile, credential, and cache handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireTenantAdmin;
use crate::state::AppState;
use crate::tenancy::credentials::names;

/// Cache key for the rendered tenant profile.
const PROFILE_CACHE_KEY: &str = "profile";

/// Tenant profile: branding basics, business hours, and whether the store is
/// open right now (UTC; tenants configure hours in their own reference time).
///
/// The rendered payload is cached under the tenant's namespace.
pub async fn profile(
    State(state): State<AppState>,
    RequireTenantAdmin { context, tenant }: RequireTenantAdmin,
) -> Result<Json<serde_json::Value>> {
    if let Some(cached) = state.cache().get(&context, PROFILE_CACHE_KEY, false).await {
        return Ok(Json((*cached).clone()));
    }

    let now = Utc::now();
    let open_now = tenant.business_hours.is_open_at(now.weekday(), now.time());

    let payload = serde_json::json!({
        "slug": tenant.slug,
        "name": tenant.name,
        "custom_domain": tenant.custom_domain,
        "subdomain": tenant.subdomain,
        "business_hours": tenant.business_hours,
        "open_now": open_now,
    });

    state
        .cache()
        .insert(&context, PROFILE_CACHE_KEY, Arc::new(payload.clone()), false)
        .await;

    Ok(Json(payload))
}

/// Payment credential status for this tenant.
///
/// Resolves the credential at call time; a missing credential surfaces the
/// tenant-specific configuration error rather than any shared fallback.
pub async fn payments_status(
    State(state): State<AppState>,
    RequireTenantAdmin { tenant, .. }: RequireTenantAdmin,
) -> Result<Json<serde_json::Value>> {
    state
        .credentials()
        .get(tenant.id, names::PAYMENT_GATEWAY)
        .await?;

    Ok(Json(serde_json::json!({ "configured": true })))
}

/// Request body for cache invalidation.
#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    /// Logical key prefix to evict; empty clears the tenant's namespace.
    #[serde(default)]
    pub prefix: String,
}

/// Invalidate this tenant's cached entries under a logical key prefix.
///
/// Scoped to the resolved tenant's namespace by construction; shared entries
/// and sibling tenants are untouchable from here.
pub async fn invalidate_cache(
    State(state): State<AppState>,
    RequireTenantAdmin { tenant, .. }: RequireTenantAdmin,
    Json(req): Json<InvalidateRequest>,
) -> StatusCode {
    state.cache().invalidate(tenant.id, &req.prefix);
    StatusCode::NO_CONTENT
}
