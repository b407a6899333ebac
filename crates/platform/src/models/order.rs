//! Order domain type.
//!
//! Orders stand in for any tenant-owned aggregate; every query path for them
//! goes through the scoped accessor.

use chrono::{DateTime, Utc};
use serde::Serialize;

use mangrove_core::{OrderId, TenantId};

/// A tenant-owned order (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning tenant. Stamped at insert time by the repository.
    pub tenant_id: TenantId,
    /// Human-facing order reference.
    pub reference: String,
    /// Order total in minor currency units.
    pub total_cents: i64,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an order. Carries no tenant id; the repository stamps
/// the owning tenant from the scope filter.
#[derive(Debug, Clone)]
pub struct NewOrder {
    /// Human-facing order reference.
    pub reference: String,
    /// Order total in minor currency units.
    pub total_cents: i64,
}
