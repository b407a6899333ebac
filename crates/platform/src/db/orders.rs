//! Order repository, the scoped-accessor reference aggregate.
//!
//! Every method takes a [`ScopeFilter`]; there is no unscoped query path.
//! Reads include the tenant in the predicate, inserts stamp the owning
//! tenant from the filter, and an unrestricted filter on a write path is
//! rejected as a programming error.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use mangrove_core::{OrderId, TenantId};

use super::RepositoryError;
use crate::models::{NewOrder, Order};
use crate::tenancy::ScopeFilter;

/// Raw order row as stored.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    tenant_id: i32,
    reference: String,
    total_cents: i64,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            tenant_id: TenantId::new(row.tenant_id),
            reference: row.reference,
            total_cents: row.total_cents,
            created_at: row.created_at,
        }
    }
}

/// Repository for tenant-owned orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders visible under the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: ScopeFilter) -> Result<Vec<Order>, RepositoryError> {
        let rows = match filter {
            ScopeFilter::Tenant(tenant_id) => {
                sqlx::query_as::<_, OrderRow>(
                    "SELECT id, tenant_id, reference, total_cents, created_at \
                     FROM tenant_order WHERE tenant_id = $1 ORDER BY created_at DESC",
                )
                .bind(tenant_id.as_i32())
                .fetch_all(self.pool)
                .await?
            }
            ScopeFilter::Unrestricted => {
                sqlx::query_as::<_, OrderRow>(
                    "SELECT id, tenant_id, reference, total_cents, created_at \
                     FROM tenant_order ORDER BY created_at DESC",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Order::from).collect())
    }

    /// Get one order. The tenant is part of the predicate, so an order owned
    /// by another tenant reads as absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        filter: ScopeFilter,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = match filter {
            ScopeFilter::Tenant(tenant_id) => {
                sqlx::query_as::<_, OrderRow>(
                    "SELECT id, tenant_id, reference, total_cents, created_at \
                     FROM tenant_order WHERE id = $1 AND tenant_id = $2",
                )
                .bind(id.as_i32())
                .bind(tenant_id.as_i32())
                .fetch_optional(self.pool)
                .await?
            }
            ScopeFilter::Unrestricted => {
                sqlx::query_as::<_, OrderRow>(
                    "SELECT id, tenant_id, reference, total_cents, created_at \
                     FROM tenant_order WHERE id = $1",
                )
                .bind(id.as_i32())
                .fetch_optional(self.pool)
                .await?
            }
        };

        Ok(row.map(Order::from))
    }

    /// Create an order, stamping the owning tenant from the filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnscopedWrite` for an unrestricted filter;
    /// super-admins creating on behalf of a tenant must target it explicitly.
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        filter: ScopeFilter,
        new_order: NewOrder,
    ) -> Result<Order, RepositoryError> {
        let tenant_id = filter.tenant_id().ok_or(RepositoryError::UnscopedWrite)?;

        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO tenant_order (tenant_id, reference, total_cents) \
             VALUES ($1, $2, $3) \
             RETURNING id, tenant_id, reference, total_cents, created_at",
        )
        .bind(tenant_id.as_i32())
        .bind(&new_order.reference)
        .bind(new_order.total_cents)
        .fetch_one(self.pool)
        .await?;

        Ok(Order::from(row))
    }
}
