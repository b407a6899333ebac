//! Per-tenant role tags.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role an actor holds within a single tenant.
///
/// This is the only per-tenant role vocabulary; the cross-tenant super-admin
/// capability is an explicit flag on the actor, never a role value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantRole {
    /// Full administrative access to this tenant's data.
    Admin,
    /// Read-only access; never yields an administrative scope.
    Viewer,
}

impl TenantRole {
    /// True if this role grants administrative privilege within its tenant.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for TenantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl FromStr for TenantRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_grants_privilege() {
        assert!(TenantRole::Admin.is_admin());
        assert!(!TenantRole::Viewer.is_admin());
    }

    #[test]
    fn round_trips_through_str() {
        assert_eq!("admin".parse::<TenantRole>().unwrap(), TenantRole::Admin);
        assert_eq!(TenantRole::Viewer.to_string(), "viewer");
        assert!("root".parse::<TenantRole>().is_err());
    }
}
