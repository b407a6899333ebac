//! Core types for Mangrove.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod host;
pub mod hours;
pub mod id;
pub mod role;
pub mod scope;
pub mod slug;

pub use email::{Email, EmailError};
pub use host::HostName;
pub use hours::{BusinessHours, DayHours};
pub use id::*;
pub use role::TenantRole;
pub use scope::{AuthorizationContext, Scope};
pub use slug::{SlugError, TenantSlug};
