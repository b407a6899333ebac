//! HTTP middleware stack for the platform.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Tenant/authorization extractors (per-handler)

pub mod session;
pub mod tenant;

pub use session::create_session_layer;
pub use tenant::{RequireSuperAdmin, RequireTenantAdmin};
