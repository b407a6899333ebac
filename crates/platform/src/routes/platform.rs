//! Cross-tenant platform handlers.
//!
//! A separate route class reachable only with super-admin scope. The target
//! tenant is always an explicit parameter; a super-admin's own host does not
//! determine which tenant's data they intend to view.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use mangrove_core::TenantId;

use crate::db::{OrderRepository, TenantRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireSuperAdmin;
use crate::models::{Order, Tenant};
use crate::state::AppState;
use crate::tenancy::scoped;

/// Tenant listing row for the platform view.
#[derive(Debug, Serialize)]
pub struct TenantSummary {
    /// Stable internal identifier.
    pub id: TenantId,
    /// Unique slug.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Custom domain, if configured.
    pub custom_domain: Option<String>,
    /// Subdomain label, if configured.
    pub subdomain: Option<String>,
    /// Whether the tenant currently resolves.
    pub is_active: bool,
}

impl From<Tenant> for TenantSummary {
    fn from(tenant: Tenant) -> Self {
        Self {
            id: tenant.id,
            slug: tenant.slug.as_str().to_string(),
            name: tenant.name,
            custom_domain: tenant.custom_domain.map(|h| h.as_str().to_string()),
            subdomain: tenant.subdomain,
            is_active: tenant.is_active,
        }
    }
}

/// List every tenant, active and inactive.
pub async fn list_tenants(
    State(state): State<AppState>,
    RequireSuperAdmin { .. }: RequireSuperAdmin,
) -> Result<Json<Vec<TenantSummary>>> {
    let tenants = TenantRepository::new(state.pool()).list_all().await?;
    Ok(Json(tenants.into_iter().map(TenantSummary::from).collect()))
}

/// One tenant's orders, explicitly targeted.
pub async fn tenant_orders(
    State(state): State<AppState>,
    RequireSuperAdmin { context }: RequireSuperAdmin,
    Path(id): Path<i32>,
) -> Result<Json<Vec<Order>>> {
    let target = TenantId::new(id);

    // 404 before listing so a super-admin gets a clear signal for a typo'd
    // tenant id instead of an empty list.
    TenantRepository::new(state.pool())
        .get_by_id(target)
        .await?
        .ok_or(AppError::TenantNotFound)?;

    let filter = scoped::filter_for_target(&context, target)?;
    let orders = OrderRepository::new(state.pool()).list(filter).await?;

    Ok(Json(orders))
}

/// Orders across all tenants.
pub async fn all_orders(
    State(state): State<AppState>,
    RequireSuperAdmin { context }: RequireSuperAdmin,
) -> Result<Json<Vec<Order>>> {
    let filter = scoped::filter_for(&context)?;
    let orders = OrderRepository::new(state.pool()).list(filter).await?;

    Ok(Json(orders))
}
