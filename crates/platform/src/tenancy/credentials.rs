//! Per-tenant credential injection.
//!
//! Third-party credentials (e.g. the payment-gateway token) are resolved
//! from the tenant registry at the point of use, never from process-wide
//! environment configuration. That channel is reserved for genuinely global
//! configuration like the database URL; anything tenant-specific that leaked
//! into it would be one misconfiguration away from crossing tenants.

use secrecy::SecretString;
use thiserror::Error;

use mangrove_core::TenantId;

use super::registry::TenantRegistry;

/// Well-known credential names.
pub mod names {
    /// Payment-gateway access token.
    pub const PAYMENT_GATEWAY: &str = "payment_gateway";
}

/// Errors resolving a tenant credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The tenant has no credential under this name.
    ///
    /// An operator-fixable state, not a bug: the calling feature surfaces a
    /// tenant-specific configuration error and never falls back to another
    /// tenant's credential or a shared default.
    #[error("credential '{name}' is not configured for tenant {tenant_id}")]
    NotConfigured {
        /// The tenant whose credential was requested.
        tenant_id: TenantId,
        /// The credential name.
        name: String,
    },
}

/// Resolves tenant-scoped secrets from the registry.
#[derive(Clone)]
pub struct CredentialInjector<R> {
    registry: R,
}

impl<R: TenantRegistry> CredentialInjector<R> {
    /// Create an injector over a registry.
    #[must_use]
    pub const fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Resolve a named credential for one tenant.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NotConfigured`] when the tenant has no
    /// such credential (including when the registry is unreachable; failing
    /// closed is the safe direction for secrets).
    pub async fn get(
        &self,
        tenant_id: TenantId,
        name: &str,
    ) -> Result<SecretString, CredentialError> {
        self.registry.credential(tenant_id, name).await.ok_or_else(|| {
            CredentialError::NotConfigured {
                tenant_id,
                name: name.to_string(),
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;
    use crate::tenancy::registry::testing::InMemoryRegistry;

    #[tokio::test]
    async fn resolves_per_tenant_secret() {
        let mut registry = InMemoryRegistry::default();
        registry.add_credential(TenantId::new(1), names::PAYMENT_GATEWAY, "tok_north");
        registry.add_credential(TenantId::new(2), names::PAYMENT_GATEWAY, "tok_south");

        let injector = CredentialInjector::new(registry);
        let secret = injector
            .get(TenantId::new(2), names::PAYMENT_GATEWAY)
            .await
            .unwrap();
        assert_eq!(secret.expose_secret(), "tok_south");
    }

    #[tokio::test]
    async fn missing_credential_never_falls_back() {
        let mut registry = InMemoryRegistry::default();
        // Only tenant 1 is configured; tenant 2 must not inherit it.
        registry.add_credential(TenantId::new(1), names::PAYMENT_GATEWAY, "tok_north");

        let injector = CredentialInjector::new(registry);
        let err = injector
            .get(TenantId::new(2), names::PAYMENT_GATEWAY)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialError::NotConfigured { tenant_id, .. } if tenant_id == TenantId::new(2)
        ));
    }
}
