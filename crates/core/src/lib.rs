//! SmartHome Hub Core - Shared domain types.
//!
//! Types used by the storefront server and its tests:
//! - typed entity ids
//! - validated email addresses
//! - USD prices with display formatting
//! - the backend's pagination envelope and its invariants
//! - supported locales and text direction
//! - wishlist membership keys
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no session access. This keeps it lightweight and easy to test.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
