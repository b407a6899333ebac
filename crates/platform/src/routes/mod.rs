//! HTTP route handlers for the platform.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (DB ping)
//!
//! # Tenant-scoped admin (host-resolved, tenant-admin or stronger)
//! GET  /admin/profile              - Tenant profile incl. business hours
//! GET  /admin/orders               - List this tenant's orders
//! POST /admin/orders               - Create an order for this tenant
//! GET  /admin/payments/status      - Payment credential status
//! POST /admin/cache/invalidate     - Invalidate this tenant's cache entries
//!
//! # Cross-tenant platform (super-admin only, explicit target tenant)
//! GET  /platform/tenants           - List every tenant
//! GET  /platform/tenants/{id}/orders - One tenant's orders
//! GET  /platform/orders            - Orders across all tenants
//! ```

pub mod orders;
pub mod platform;
pub mod tenant;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the tenant-scoped admin router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(tenant::profile))
        .route("/orders", get(orders::index).post(orders::create))
        .route("/payments/status", get(tenant::payments_status))
        .route("/cache/invalidate", post(tenant::invalidate_cache))
}

/// Create the cross-tenant platform router.
pub fn platform_routes() -> Router<AppState> {
    Router::new()
        .route("/tenants", get(platform::list_tenants))
        .route("/tenants/{id}/orders", get(platform::tenant_orders))
        .route("/orders", get(platform::all_orders))
}

/// Create the full application router (without layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin_routes())
        .nest("/platform", platform_routes())
}
