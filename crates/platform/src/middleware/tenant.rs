//! Tenant resolution and authorization extractors.
//!
//! These implement the handler wrapping convention: a privileged handler
//! takes an extractor, and by the time its body runs the tenant has been
//! resolved and the authorization context built. If the decision is denied,
//! the handler is never invoked; the rejection carries the structured
//! 401/403-equivalent response.

use axum::{
    extract::FromRequestParts,
    http::{header::HOST, request::Parts},
};
use tower_sessions::Session;

use mangrove_core::{AuthorizationContext, HostName, TenantSlug};

use crate::error::AppError;
use crate::models::{CurrentActor, Tenant, session_keys};
use crate::state::AppState;

/// Header naming a tenant slug directly; honored only in local mode.
pub const DEV_TENANT_HEADER: &str = "x-mangrove-tenant";

/// Extractor that resolves the tenant from the request host and requires a
/// tenant-admin (or stronger) context bound to it.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireTenantAdmin { context, tenant }: RequireTenantAdmin,
/// ) -> impl IntoResponse {
///     format!("Managing {}", tenant.name)
/// }
/// ```
pub struct RequireTenantAdmin {
    /// The per-request authorization context.
    pub context: AuthorizationContext,
    /// The host-resolved tenant.
    pub tenant: Tenant,
}

impl FromRequestParts<AppState> for RequireTenantAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let host = host_from_parts(parts).ok_or(AppError::TenantNotFound)?;
        let dev_override = dev_override_from_parts(parts);

        let resolved = state.resolver().resolve(&host, dev_override.as_ref()).await;
        let actor = actor_from_parts(parts).await;

        let context = state.authz().build(actor.as_ref(), resolved.as_ref());

        let Some(tenant) = resolved else {
            return Err(AppError::TenantNotFound);
        };

        if !context.is_allowed() {
            return Err(match actor {
                None => AppError::Unauthenticated,
                Some(_) => AppError::Forbidden,
            });
        }

        Ok(Self { context, tenant })
    }
}

/// Extractor for the cross-tenant platform route class.
///
/// Host resolution plays no part: access requires the explicit super-admin
/// flag, and the target tenant comes from request parameters.
pub struct RequireSuperAdmin {
    /// The per-request authorization context (always super-admin scope).
    pub context: AuthorizationContext,
}

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = actor_from_parts(parts).await;
        let context = state.authz().build_cross_tenant(actor.as_ref());

        if !context.is_allowed() {
            return Err(match actor {
                None => AppError::Unauthenticated,
                Some(_) => AppError::Forbidden,
            });
        }

        Ok(Self { context })
    }
}

/// Normalized host from the `Host` header.
fn host_from_parts(parts: &Parts) -> Option<HostName> {
    let raw = parts.headers.get(HOST)?.to_str().ok()?;
    Some(HostName::normalize(raw))
}

/// Developer override slug, if the header carries a well-formed one.
fn dev_override_from_parts(parts: &Parts) -> Option<TenantSlug> {
    let raw = parts.headers.get(DEV_TENANT_HEADER)?.to_str().ok()?;
    TenantSlug::parse(raw).ok()
}

/// The session actor, if a session exists and carries one.
async fn actor_from_parts(parts: &Parts) -> Option<CurrentActor> {
    let session = parts.extensions.get::<Session>()?;
    session
        .get::<CurrentActor>(session_keys::CURRENT_ACTOR)
        .await
        .ok()
        .flatten()
}

/// Helper to set the current actor in the session.
///
/// Called by the external authentication collaborator after it validates a
/// sign-in.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_actor(
    session: &Session,
    actor: &CurrentActor,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ACTOR, actor).await
}

/// Helper to clear the current actor from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_actor(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentActor>(session_keys::CURRENT_ACTOR)
        .await?;
    Ok(())
}
