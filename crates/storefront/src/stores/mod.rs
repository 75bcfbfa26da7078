//! Per-visitor persisted stores.
//!
//! Three independent stores survive across requests:
//!
//! | Store | Storage key | Fields |
//! |-------|-------------|--------|
//! | [`AuthStore`] | `auth-storage` | `user`, `token`, `isAuthenticated` |
//! | [`WishlistStore`] | `wishlist-storage` | `items` (`"{type}-{id}"` keys) |
//! | [`UiStore`] | `ui-storage` | `sidebarOpen`, `theme` |
//!
//! Each store is rehydrated wholesale when loaded, mutated only through its
//! named operations, and written back in full after every mutation as
//! `{"state": {...}, "version": 0}`. Where the snapshot lives is decided by
//! the injected [`Storage`]: the visitor's session in production, a
//! [`MemoryStorage`] in tests.

mod auth;
mod persisted;
mod storage;
mod ui;
mod wishlist;

pub use auth::{AuthState, AuthStore};
pub use persisted::{PersistedStore, StoreState};
pub use storage::{MemoryStorage, Storage};
pub use ui::{Theme, UiState, UiStore};
pub use wishlist::{WishlistState, WishlistStore};

use thiserror::Error;

/// Errors reading or writing persisted store snapshots.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The session backend failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// A snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
