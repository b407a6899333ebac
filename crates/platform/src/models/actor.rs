//! Authenticated actor types.
//!
//! The external authentication collaborator validates credentials and stores
//! a [`CurrentActor`] in the session; this core only reads it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mangrove_core::{ActorId, Email, TenantId, TenantRole};

/// Session keys used by the platform.
pub mod session_keys {
    /// Key under which the authenticated actor is stored.
    pub const CURRENT_ACTOR: &str = "current_actor";
}

/// The authenticated actor for the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentActor {
    /// Durable actor identity. `None` never appears in session-stored actors;
    /// only the bypass path synthesizes identity-less contexts.
    pub id: Option<ActorId>,
    /// Actor's email address.
    pub email: Email,
    /// Actor's display name.
    pub display_name: String,
    /// Per-tenant role grants.
    pub roles_by_tenant: HashMap<TenantId, TenantRole>,
    /// Cross-tenant capability. Explicitly provisioned; never derived from
    /// `roles_by_tenant`.
    pub is_super_admin: bool,
}

impl CurrentActor {
    /// The actor's role within one tenant, if any.
    #[must_use]
    pub fn role_for(&self, tenant_id: TenantId) -> Option<TenantRole> {
        self.roles_by_tenant.get(&tenant_id).copied()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_lookup_is_per_tenant() {
        let mut roles = HashMap::new();
        roles.insert(TenantId::new(1), TenantRole::Admin);

        let actor = CurrentActor {
            id: Some(ActorId::new(5)),
            email: Email::parse("alice@example.com").unwrap(),
            display_name: "Alice".to_string(),
            roles_by_tenant: roles,
            is_super_admin: false,
        };

        assert_eq!(actor.role_for(TenantId::new(1)), Some(TenantRole::Admin));
        assert_eq!(actor.role_for(TenantId::new(2)), None);
    }

    #[test]
    fn actor_round_trips_through_json() {
        let mut roles = HashMap::new();
        roles.insert(TenantId::new(3), TenantRole::Viewer);

        let actor = CurrentActor {
            id: Some(ActorId::new(7)),
            email: Email::parse("bob@example.com").unwrap(),
            display_name: "Bob".to_string(),
            roles_by_tenant: roles,
            is_super_admin: true,
        };

        let json = serde_json::to_string(&actor).unwrap();
        let back: CurrentActor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.role_for(TenantId::new(3)), Some(TenantRole::Viewer));
        assert!(back.is_super_admin);
    }
}
