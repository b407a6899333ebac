//! Append-only audit trail for authorization decisions.
//!
//! Every decision is recorded with the resolved tenant, the actor (if any),
//! the outcome, and whether the bypass path was used. Records go through a
//! dedicated `tracing` target so operators can route them to durable storage
//! independently of application logs; emission never blocks the request.

use mangrove_core::AuthorizationContext;

/// Tracing target for audit records.
pub const AUDIT_TARGET: &str = "audit";

/// Record one authorization decision.
pub fn record_decision(ctx: &AuthorizationContext) {
    tracing::info!(
        target: AUDIT_TARGET,
        tenant_id = ctx.tenant_id().map(|id| id.as_i32()),
        actor_id = ctx.actor_id().map(|id| id.as_i32()),
        decision = ctx.scope().as_str(),
        bypass = ctx.is_bypass(),
        "authorization decision"
    );
}
