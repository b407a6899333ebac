//! Authorization context construction.
//!
//! One pure decision function over (actor, resolved tenant). Nothing here
//! queries the registry, so decisions are deterministic and testable in
//! isolation. The bypass flag is injected once at construction and never
//! re-read per request.

use mangrove_core::AuthorizationContext;

use super::audit;
use crate::models::{CurrentActor, Tenant};

/// Builds the per-request [`AuthorizationContext`].
#[derive(Debug, Clone, Copy)]
pub struct AuthzBuilder {
    bypass_enabled: bool,
}

impl AuthzBuilder {
    /// Create a builder.
    ///
    /// `bypass_enabled` comes from startup configuration only; it exists so
    /// local development and automated tests can run without a full session
    /// stack, and must be unreachable in a production configuration (config
    /// loading rejects it outside local mode).
    #[must_use]
    pub const fn new(bypass_enabled: bool) -> Self {
        Self { bypass_enabled }
    }

    /// Build a context for a host-resolved request.
    ///
    /// Rules, in order: unresolved tenant denies regardless of actor; bypass
    /// synthesizes a tenant-admin; no actor denies; the super-admin flag wins
    /// over per-tenant roles; otherwise the actor's role for this tenant
    /// decides.
    #[must_use]
    pub fn build(
        &self,
        actor: Option<&CurrentActor>,
        resolved: Option<&Tenant>,
    ) -> AuthorizationContext {
        let ctx = self.decide(actor, resolved);
        audit::record_decision(&ctx);
        ctx
    }

    /// Build a context for the cross-tenant platform route class.
    ///
    /// Host resolution is irrelevant there: a super-admin's own host does not
    /// determine which tenant they intend to view. Only the explicit
    /// super-admin flag grants access; the bypass path never does.
    #[must_use]
    pub fn build_cross_tenant(&self, actor: Option<&CurrentActor>) -> AuthorizationContext {
        let ctx = match actor {
            Some(a) if a.is_super_admin => match a.id {
                Some(actor_id) => AuthorizationContext::super_admin(None, actor_id),
                None => AuthorizationContext::denied(None, None),
            },
            _ => AuthorizationContext::denied(None, actor.and_then(|a| a.id)),
        };
        audit::record_decision(&ctx);
        ctx
    }

    fn decide(
        &self,
        actor: Option<&CurrentActor>,
        resolved: Option<&Tenant>,
    ) -> AuthorizationContext {
        let Some(tenant) = resolved else {
            return AuthorizationContext::denied(None, actor.and_then(|a| a.id));
        };

        if self.bypass_enabled {
            // Keep the actor id when a real session exists so the audit
            // record still names who was behind the request.
            return AuthorizationContext::bypass(tenant.id, actor.and_then(|a| a.id));
        }

        let Some(actor) = actor else {
            return AuthorizationContext::denied(Some(tenant.id), None);
        };

        if actor.is_super_admin {
            return match actor.id {
                Some(actor_id) => AuthorizationContext::super_admin(Some(tenant.id), actor_id),
                None => AuthorizationContext::denied(Some(tenant.id), None),
            };
        }

        match (actor.id, actor.role_for(tenant.id)) {
            (Some(actor_id), Some(role)) if role.is_admin() => {
                AuthorizationContext::tenant_admin(tenant.id, actor_id)
            }
            (actor_id, _) => AuthorizationContext::denied(Some(tenant.id), actor_id),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;

    use mangrove_core::{
        ActorId, BusinessHours, Email, HostName, Scope, TenantId, TenantRole, TenantSlug,
    };

    use super::*;

    fn tenant(id: i32, slug: &str) -> Tenant {
        Tenant {
            id: TenantId::new(id),
            slug: TenantSlug::parse(slug).unwrap(),
            name: slug.to_string(),
            custom_domain: Some(HostName::normalize(&format!("{slug}.example.com"))),
            subdomain: None,
            business_hours: BusinessHours::default(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn actor(id: i32, roles: &[(i32, TenantRole)], is_super_admin: bool) -> CurrentActor {
        let roles_by_tenant: HashMap<_, _> = roles
            .iter()
            .map(|&(tenant_id, role)| (TenantId::new(tenant_id), role))
            .collect();
        CurrentActor {
            id: Some(ActorId::new(id)),
            email: Email::parse("alice@example.com").unwrap(),
            display_name: "Alice".to_string(),
            roles_by_tenant,
            is_super_admin,
        }
    }

    #[test]
    fn unresolved_tenant_denies_even_super_admin() {
        let builder = AuthzBuilder::new(false);
        let alice = actor(1, &[], true);
        let ctx = builder.build(Some(&alice), None);
        assert_eq!(ctx.scope(), Scope::Denied);
    }

    #[test]
    fn no_actor_denies() {
        let builder = AuthzBuilder::new(false);
        let north = tenant(1, "north-store");
        let ctx = builder.build(None, Some(&north));
        assert_eq!(ctx.scope(), Scope::Denied);
        assert_eq!(ctx.tenant_id(), Some(TenantId::new(1)));
    }

    #[test]
    fn admin_role_grants_tenant_admin_on_own_tenant() {
        // alice: roles_by_tenant = {north-store: admin}, not super admin
        let builder = AuthzBuilder::new(false);
        let north = tenant(1, "north-store");
        let alice = actor(1, &[(1, TenantRole::Admin)], false);

        let ctx = builder.build(Some(&alice), Some(&north));
        assert_eq!(ctx.scope(), Scope::TenantAdmin);
        assert_eq!(ctx.tenant_id(), Some(TenantId::new(1)));
        assert!(!ctx.is_bypass());
    }

    #[test]
    fn admin_role_on_other_tenant_denies() {
        let builder = AuthzBuilder::new(false);
        let south = tenant(2, "south-store");
        let alice = actor(1, &[(1, TenantRole::Admin)], false);

        let ctx = builder.build(Some(&alice), Some(&south));
        assert_eq!(ctx.scope(), Scope::Denied);
    }

    #[test]
    fn viewer_role_denies() {
        let builder = AuthzBuilder::new(false);
        let north = tenant(1, "north-store");
        let viewer = actor(2, &[(1, TenantRole::Viewer)], false);

        let ctx = builder.build(Some(&viewer), Some(&north));
        assert_eq!(ctx.scope(), Scope::Denied);
    }

    #[test]
    fn super_admin_flag_wins_over_missing_role() {
        let builder = AuthzBuilder::new(false);
        let south = tenant(2, "south-store");
        let root = actor(3, &[], true);

        let ctx = builder.build(Some(&root), Some(&south));
        assert_eq!(ctx.scope(), Scope::SuperAdmin);
        assert_eq!(ctx.tenant_id(), Some(TenantId::new(2)));
    }

    #[test]
    fn bypass_synthesizes_tenant_admin_without_actor() {
        let builder = AuthzBuilder::new(true);
        let north = tenant(1, "north-store");

        let ctx = builder.build(None, Some(&north));
        assert_eq!(ctx.scope(), Scope::TenantAdmin);
        assert!(ctx.is_bypass());
        assert_eq!(ctx.actor_id(), None);
    }

    #[test]
    fn bypass_keeps_signed_in_actor_for_audit() {
        let builder = AuthzBuilder::new(true);
        let north = tenant(1, "north-store");
        let alice = actor(1, &[], false);

        let ctx = builder.build(Some(&alice), Some(&north));
        assert!(ctx.is_bypass());
        assert_eq!(ctx.actor_id(), Some(ActorId::new(1)));
    }

    #[test]
    fn bypass_disabled_is_fully_closed() {
        // Disabling the flag is sufficient to close the bypass path entirely,
        // regardless of request shape.
        let builder = AuthzBuilder::new(false);
        let north = tenant(1, "north-store");

        let ctx = builder.build(None, Some(&north));
        assert_eq!(ctx.scope(), Scope::Denied);
        assert!(!ctx.is_bypass());
    }

    #[test]
    fn bypass_never_resolves_unknown_tenant() {
        let builder = AuthzBuilder::new(true);
        let ctx = builder.build(None, None);
        assert_eq!(ctx.scope(), Scope::Denied);
        assert!(!ctx.is_bypass());
    }

    #[test]
    fn cross_tenant_requires_super_admin() {
        let builder = AuthzBuilder::new(false);
        let alice = actor(1, &[(1, TenantRole::Admin)], false);
        let root = actor(3, &[], true);

        assert_eq!(
            builder.build_cross_tenant(Some(&alice)).scope(),
            Scope::Denied
        );
        assert_eq!(builder.build_cross_tenant(None).scope(), Scope::Denied);
        assert_eq!(
            builder.build_cross_tenant(Some(&root)).scope(),
            Scope::SuperAdmin
        );
    }

    #[test]
    fn bypass_never_grants_cross_tenant() {
        let builder = AuthzBuilder::new(true);
        assert_eq!(builder.build_cross_tenant(None).scope(), Scope::Denied);
    }
}
