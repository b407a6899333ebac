//! Mangrove Core - Shared types library.
//!
//! This crate provides common types used across all Mangrove components:
//! - `platform` - The shared deployment serving every storefront tenant
//! - `cli` - Command-line tools for migrations and provisioning
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, slugs, hostnames,
//!   authorization scopes, and business hours

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
