use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use smarthome_core::{WishlistItemKind, WishlistKey};

use super::{PersistedStore, Storage, StoreError, StoreState};
use crate::backend::Wishlist;

/// Locally known wishlist membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WishlistState {
    pub items: BTreeSet<WishlistKey>,
}

impl StoreState for WishlistState {
    const STORAGE_KEY: &'static str = "wishlist-storage";
}

/// The visitor's wishlist store.
///
/// Membership is optimistic: it is updated after the backend accepts a
/// change, and replaced wholesale only by [`Self::reconcile`].
#[derive(Debug)]
pub struct WishlistStore<S> {
    inner: PersistedStore<WishlistState, S>,
}

impl<S: Storage> WishlistStore<S> {
    pub async fn load(storage: S) -> Self {
        Self {
            inner: PersistedStore::rehydrate(storage).await,
        }
    }

    #[must_use]
    pub fn items(&self) -> &BTreeSet<WishlistKey> {
        &self.inner.state().items
    }

    #[must_use]
    pub fn is_in_wishlist(&self, kind: WishlistItemKind, id: i32) -> bool {
        self.items().contains(&WishlistKey::new(kind, id))
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn add_item(&mut self, key: WishlistKey) -> Result<bool, StoreError> {
        self.inner.update(|state| state.items.insert(key)).await
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn remove_item(&mut self, key: WishlistKey) -> Result<bool, StoreError> {
        self.inner.update(|state| state.items.remove(&key)).await
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.inner.update(|state| state.items.clear()).await
    }

    /// Replace local membership with the server's wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn reconcile(&mut self, wishlist: &Wishlist) -> Result<(), StoreError> {
        let items = wishlist.keys();
        self.inner.update(|state| state.items = items).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::stores::MemoryStorage;

    #[tokio::test]
    async fn test_add_remove_and_membership() {
        let storage = MemoryStorage::new();
        let mut store = WishlistStore::load(storage.clone()).await;

        assert!(store.add_item(WishlistKey::product(42)).await.unwrap());
        assert!(!store.add_item(WishlistKey::product(42)).await.unwrap());
        assert!(store.is_in_wishlist(WishlistItemKind::Product, 42));
        assert!(!store.is_in_wishlist(WishlistItemKind::Article, 42));

        assert_eq!(
            storage.raw("wishlist-storage").await.as_deref(),
            Some(r#"{"state":{"items":["product-42"]},"version":0}"#)
        );

        assert!(store.remove_item(WishlistKey::product(42)).await.unwrap());
        assert!(!store.remove_item(WishlistKey::product(42)).await.unwrap());
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_replaces_items() {
        let storage = MemoryStorage::new();
        let mut store = WishlistStore::load(storage.clone()).await;
        store.add_item(WishlistKey::product(1)).await.unwrap();

        let wishlist: Wishlist = serde_json::from_value(serde_json::json!({
            "id": 1,
            "products": [],
            "articles": [{
                "id": 7,
                "title": "Mesh Wi-Fi",
                "slug": "mesh-wifi",
                "createdAt": "2024-01-05T10:00:00Z",
                "updatedAt": "2024-01-05T10:00:00Z"
            }]
        }))
        .unwrap();
        store.reconcile(&wishlist).await.unwrap();

        let reloaded = WishlistStore::load(storage).await;
        assert!(reloaded.is_in_wishlist(WishlistItemKind::Article, 7));
        assert!(!reloaded.is_in_wishlist(WishlistItemKind::Product, 1));
    }

    #[tokio::test]
    async fn test_clear() {
        let mut store = WishlistStore::load(MemoryStorage::new()).await;
        store.add_item(WishlistKey::article(3)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.items().is_empty());
    }
}
