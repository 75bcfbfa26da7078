//! SmartHome Hub Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! - [`backend`]: typed client for the REST backend
//! - [`queries`]: cached reads with in-flight de-duplication, mutations and
//!   the invalidations they trigger
//! - [`stores`]: per-visitor auth, wishlist and UI state persisted in the
//!   session
//! - [`i18n`]: localized routing table and message catalog
//! - [`routes`]: the localized pages and form actions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod middleware;
pub mod queries;
pub mod routes;
pub mod state;
pub mod stores;
pub mod views;
