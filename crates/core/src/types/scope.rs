//! Authorization scope and per-request context.
//!
//! The [`AuthorizationContext`] is the single authorization decision for one
//! request. It is built once, passed by value, and never re-derived from raw
//! session claims downstream.

use serde::{Deserialize, Serialize};

use super::id::{ActorId, TenantId};

/// Outcome of the authorization decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// No privileged access. The wrapped handler is never invoked.
    Denied,
    /// Administrative access bound to exactly one tenant.
    TenantAdmin,
    /// Cross-tenant administrative access (explicitly provisioned flag).
    SuperAdmin,
}

impl Scope {
    /// Stable label used in audit records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Denied => "denied",
            Self::TenantAdmin => "tenant-admin",
            Self::SuperAdmin => "super-admin",
        }
    }
}

/// Immutable authorization context for a single request.
///
/// Fields are private so a context can never be widened after construction.
/// Any change in circumstances (re-authentication, a different host) requires
/// building a new context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationContext {
    tenant_id: Option<TenantId>,
    actor_id: Option<ActorId>,
    scope: Scope,
    is_bypass: bool,
}

impl AuthorizationContext {
    /// A denied context. Carries the resolved tenant (if any) and actor (if
    /// any) purely for audit records.
    #[must_use]
    pub const fn denied(tenant_id: Option<TenantId>, actor_id: Option<ActorId>) -> Self {
        Self {
            tenant_id,
            actor_id,
            scope: Scope::Denied,
            is_bypass: false,
        }
    }

    /// A tenant-admin context bound to one tenant.
    #[must_use]
    pub const fn tenant_admin(tenant_id: TenantId, actor_id: ActorId) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            actor_id: Some(actor_id),
            scope: Scope::TenantAdmin,
            is_bypass: false,
        }
    }

    /// A synthesized local/test context. Carries the session actor's id when
    /// one happens to be signed in, purely so audit records keep the identity.
    ///
    /// Only the authorization builder constructs this, and only when the
    /// process-wide bypass flag was set at startup.
    #[must_use]
    pub const fn bypass(tenant_id: TenantId, actor_id: Option<ActorId>) -> Self {
        Self {
            tenant_id: Some(tenant_id),
            actor_id,
            scope: Scope::TenantAdmin,
            is_bypass: true,
        }
    }

    /// A super-admin context. `tenant_id` is the host-resolved tenant, kept
    /// for audit; the actor may explicitly address any tenant.
    #[must_use]
    pub const fn super_admin(tenant_id: Option<TenantId>, actor_id: ActorId) -> Self {
        Self {
            tenant_id,
            actor_id: Some(actor_id),
            scope: Scope::SuperAdmin,
            is_bypass: false,
        }
    }

    /// The tenant this context is bound to, if any.
    #[must_use]
    pub const fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// The authenticated actor, if any (bypass contexts may have none).
    #[must_use]
    pub const fn actor_id(&self) -> Option<ActorId> {
        self.actor_id
    }

    /// The authorization outcome.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    /// True only for contexts synthesized by the local/test bypass path.
    #[must_use]
    pub const fn is_bypass(&self) -> bool {
        self.is_bypass
    }

    /// Convenience: true unless the scope is [`Scope::Denied`].
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        !matches!(self.scope, Scope::Denied)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scope_labels_are_stable() {
        assert_eq!(Scope::Denied.as_str(), "denied");
        assert_eq!(Scope::TenantAdmin.as_str(), "tenant-admin");
        assert_eq!(Scope::SuperAdmin.as_str(), "super-admin");
    }

    #[test]
    fn tenant_admin_is_bound_and_allowed() {
        let ctx = AuthorizationContext::tenant_admin(TenantId::new(1), ActorId::new(9));
        assert_eq!(ctx.scope(), Scope::TenantAdmin);
        assert_eq!(ctx.tenant_id(), Some(TenantId::new(1)));
        assert_eq!(ctx.actor_id(), Some(ActorId::new(9)));
        assert!(ctx.is_allowed());
        assert!(!ctx.is_bypass());
    }

    #[test]
    fn bypass_without_session_has_no_actor() {
        let ctx = AuthorizationContext::bypass(TenantId::new(2), None);
        assert_eq!(ctx.scope(), Scope::TenantAdmin);
        assert_eq!(ctx.actor_id(), None);
        assert!(ctx.is_bypass());
    }

    #[test]
    fn bypass_keeps_signed_in_actor() {
        let ctx = AuthorizationContext::bypass(TenantId::new(2), Some(ActorId::new(8)));
        assert_eq!(ctx.actor_id(), Some(ActorId::new(8)));
        assert!(ctx.is_bypass());
    }

    #[test]
    fn denied_is_not_allowed() {
        let ctx = AuthorizationContext::denied(None, None);
        assert!(!ctx.is_allowed());
        assert_eq!(ctx.tenant_id(), None);
    }
}
