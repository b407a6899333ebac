//! Tenant-scoped order handlers.
//!
//! All data access goes through the scoped accessor; the handlers never see
//! an unfiltered query path. These routes are host-resolved, so even a
//! super-admin acting here is explicitly targeted at the resolved tenant.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireTenantAdmin;
use crate::models::{NewOrder, Order};
use crate::state::AppState;
use crate::tenancy::scoped;

/// List this tenant's orders.
pub async fn index(
    State(state): State<AppState>,
    RequireTenantAdmin { context, tenant }: RequireTenantAdmin,
) -> Result<Json<Vec<Order>>> {
    let filter = scoped::filter_for_target(&context, tenant.id)?;
    let orders = OrderRepository::new(state.pool()).list(filter).await?;

    Ok(Json(orders))
}

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Human-facing order reference.
    pub reference: String,
    /// Order total in minor currency units.
    pub total_cents: i64,
}

/// Create an order for this tenant.
///
/// The owning tenant is stamped from the scope filter, never taken from the
/// request body.
pub async fn create(
    State(state): State<AppState>,
    RequireTenantAdmin { context, tenant }: RequireTenantAdmin,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    if req.reference.is_empty() {
        return Err(AppError::BadRequest("reference cannot be empty".to_string()));
    }

    let filter = scoped::filter_for_target(&context, tenant.id)?;
    let order = OrderRepository::new(state.pool())
        .create(
            filter,
            NewOrder {
                reference: req.reference,
                total_cents: req.total_cents,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}
