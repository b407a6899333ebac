//! Tenant-scoped data access enforcement.
//!
//! This is the single choke point for tenant-owned data: repositories accept
//! a [`ScopeFilter`], and the only way to obtain one is through the functions
//! here, which reject denied contexts before any query runs. A tenant-admin
//! addressing another tenant gets a `Forbidden` error, never a silently
//! empty result set, so callers can distinguish "no records" from "not
//! authorized".

use thiserror::Error;

use mangrove_core::{AuthorizationContext, Scope, TenantId};

/// Errors from scope enforcement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScopeError {
    /// No authenticated actor behind the context.
    #[error("authentication required")]
    Unauthenticated,

    /// Authenticated, but the context does not cover the requested data.
    #[error("access denied")]
    Forbidden,
}

/// The tenant restriction applied to a repository call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    /// Every read and write is restricted to this tenant; inserts stamp it.
    Tenant(TenantId),
    /// No tenant restriction. Only super-admin contexts produce this.
    Unrestricted,
}

impl ScopeFilter {
    /// The tenant this filter is bound to, if restricted.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<TenantId> {
        match self {
            Self::Tenant(id) => Some(*id),
            Self::Unrestricted => None,
        }
    }

    /// True if rows owned by `tenant_id` are visible under this filter.
    #[must_use]
    pub fn allows(&self, tenant_id: TenantId) -> bool {
        match self {
            Self::Tenant(own) => *own == tenant_id,
            Self::Unrestricted => true,
        }
    }
}

/// Derive the filter for a context's own tenant.
///
/// # Errors
///
/// `Unauthenticated` for denied contexts with no actor, `Forbidden` for
/// denied contexts with one.
pub fn filter_for(ctx: &AuthorizationContext) -> Result<ScopeFilter, ScopeError> {
    match ctx.scope() {
        Scope::Denied => Err(denial(ctx)),
        Scope::TenantAdmin => ctx
            .tenant_id()
            .map(ScopeFilter::Tenant)
            .ok_or(ScopeError::Forbidden),
        Scope::SuperAdmin => Ok(ScopeFilter::Unrestricted),
    }
}

/// Derive a filter for an explicitly named target tenant.
///
/// Tenant-admins may only target their own tenant; super-admins may target
/// any tenant (e.g. "view tenant B's orders").
///
/// # Errors
///
/// `Unauthenticated`/`Forbidden` as for [`filter_for`], plus `Forbidden`
/// when a tenant-admin targets a tenant other than their own.
pub fn filter_for_target(
    ctx: &AuthorizationContext,
    target: TenantId,
) -> Result<ScopeFilter, ScopeError> {
    match ctx.scope() {
        Scope::Denied => Err(denial(ctx)),
        Scope::TenantAdmin => {
            if ctx.tenant_id() == Some(target) {
                Ok(ScopeFilter::Tenant(target))
            } else {
                Err(ScopeError::Forbidden)
            }
        }
        Scope::SuperAdmin => Ok(ScopeFilter::Tenant(target)),
    }
}

/// Run `op` under the context's scope filter.
///
/// Denied contexts fail before `op` is invoked.
///
/// # Errors
///
/// Returns the scope error (wrapped by `op`'s error type via `From`) for
/// denied contexts, or whatever `op` returns.
pub async fn with_scope<F, Fut, T, E>(ctx: &AuthorizationContext, op: F) -> Result<T, E>
where
    F: FnOnce(ScopeFilter) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<ScopeError>,
{
    let filter = filter_for(ctx)?;
    op(filter).await
}

const fn denial(ctx: &AuthorizationContext) -> ScopeError {
    if ctx.actor_id().is_none() {
        ScopeError::Unauthenticated
    } else {
        ScopeError::Forbidden
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mangrove_core::ActorId;

    use super::*;

    fn admin_ctx(tenant: i32) -> AuthorizationContext {
        AuthorizationContext::tenant_admin(TenantId::new(tenant), ActorId::new(1))
    }

    fn super_ctx() -> AuthorizationContext {
        AuthorizationContext::super_admin(None, ActorId::new(2))
    }

    #[test]
    fn denied_without_actor_is_unauthenticated() {
        let ctx = AuthorizationContext::denied(None, None);
        assert_eq!(filter_for(&ctx), Err(ScopeError::Unauthenticated));
    }

    #[test]
    fn denied_with_actor_is_forbidden() {
        let ctx = AuthorizationContext::denied(Some(TenantId::new(1)), Some(ActorId::new(1)));
        assert_eq!(filter_for(&ctx), Err(ScopeError::Forbidden));
    }

    #[test]
    fn tenant_admin_gets_bound_filter() {
        let filter = filter_for(&admin_ctx(4)).unwrap();
        assert_eq!(filter, ScopeFilter::Tenant(TenantId::new(4)));
        assert!(filter.allows(TenantId::new(4)));
        assert!(!filter.allows(TenantId::new(5)));
    }

    #[test]
    fn tenant_admin_cross_tenant_target_is_forbidden_not_empty() {
        let err = filter_for_target(&admin_ctx(4), TenantId::new(5)).unwrap_err();
        assert_eq!(err, ScopeError::Forbidden);
    }

    #[test]
    fn tenant_admin_own_target_is_allowed() {
        let filter = filter_for_target(&admin_ctx(4), TenantId::new(4)).unwrap();
        assert_eq!(filter, ScopeFilter::Tenant(TenantId::new(4)));
    }

    #[test]
    fn super_admin_is_unrestricted_by_default() {
        let filter = filter_for(&super_ctx()).unwrap();
        assert_eq!(filter, ScopeFilter::Unrestricted);
        assert!(filter.allows(TenantId::new(9)));
    }

    #[test]
    fn super_admin_explicit_target_is_bound() {
        let filter = filter_for_target(&super_ctx(), TenantId::new(7)).unwrap();
        assert_eq!(filter, ScopeFilter::Tenant(TenantId::new(7)));
        assert!(!filter.allows(TenantId::new(8)));
    }

    #[tokio::test]
    async fn with_scope_never_invokes_op_when_denied() {
        let ctx = AuthorizationContext::denied(None, None);
        let mut invoked = false;

        let result: Result<(), ScopeError> = with_scope(&ctx, |_filter| {
            invoked = true;
            async { Ok(()) }
        })
        .await;

        assert_eq!(result, Err(ScopeError::Unauthenticated));
        assert!(!invoked);
    }

    #[tokio::test]
    async fn with_scope_passes_bound_filter() {
        let result: Result<ScopeFilter, ScopeError> =
            with_scope(&admin_ctx(3), |filter| async move { Ok(filter) }).await;
        assert_eq!(result.unwrap(), ScopeFilter::Tenant(TenantId::new(3)));
    }
}
