//! Tenant resolution, authorization, and per-tenant isolation.
//!
//! # Request flow
//!
//! 1. [`resolver::TenantResolver`] turns the request host (and local-mode
//!    override) into exactly one tenant, or not-found.
//! 2. [`authz::AuthzBuilder`] combines the session actor with the resolved
//!    tenant into one immutable `AuthorizationContext`.
//! 3. Everything downstream - [`scoped`] repositories, the [`cache`]
//!    namespace, [`credentials`] injection - consumes that context and never
//!    re-derives authorization from raw claims.
//!
//! Every decision is recorded through [`audit`], fire-and-forget.

pub mod audit;
pub mod authz;
pub mod cache;
pub mod credentials;
pub mod registry;
pub mod resolver;
pub mod scoped;

pub use authz::AuthzBuilder;
pub use cache::TenantCache;
pub use credentials::{CredentialError, CredentialInjector};
pub use registry::PgTenantRegistry;
pub use resolver::TenantResolver;
pub use scoped::{ScopeError, ScopeFilter};
