//! Domain models for the platform.

pub mod actor;
pub mod order;
pub mod tenant;

pub use actor::{CurrentActor, session_keys};
pub use order::{NewOrder, Order};
pub use tenant::Tenant;
