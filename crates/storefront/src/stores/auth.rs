use std::fmt;

use serde::{Deserialize, Serialize};

use super::{PersistedStore, Storage, StoreError, StoreState};
use crate::backend::User;

/// Signed-in user and bearer token.
///
/// `is_authenticated` is true exactly when both `user` and `token` are set.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthState {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl fmt::Debug for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthState")
            .field("user", &self.user.as_ref().map(|u| u.id))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("is_authenticated", &self.is_authenticated)
            .finish()
    }
}

impl StoreState for AuthState {
    const STORAGE_KEY: &'static str = "auth-storage";
}

/// The visitor's authentication store.
#[derive(Debug)]
pub struct AuthStore<S> {
    inner: PersistedStore<AuthState, S>,
}

impl<S: Storage> AuthStore<S> {
    pub async fn load(storage: S) -> Self {
        let mut inner = PersistedStore::<AuthState, S>::rehydrate(storage).await;
        if inner.state().is_authenticated
            && (inner.state().user.is_none() || inner.state().token.is_none())
        {
            tracing::warn!("Persisted auth state is inconsistent, signing out");
            if let Err(e) = inner.clear().await {
                tracing::warn!(error = %e, "Failed to clear inconsistent auth state");
            }
        }
        Self { inner }
    }

    #[must_use]
    pub const fn state(&self) -> &AuthState {
        self.inner.state()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.state().user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.state().token.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    /// Record a successful login or registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn set_auth(&mut self, user: User, token: String) -> Result<(), StoreError> {
        self.inner
            .update(|state| {
                state.user = Some(user);
                state.token = Some(token);
                state.is_authenticated = true;
            })
            .await
    }

    /// Forget the user and token and remove the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.inner.clear().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::stores::MemoryStorage;

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 5,
            "email": "ada@example.com",
            "name": "Ada",
            "createdAt": "2024-01-05T10:00:00Z",
            "updatedAt": "2024-01-05T10:00:00Z"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_set_auth_then_logout() {
        let storage = MemoryStorage::new();
        let mut store = AuthStore::load(storage.clone()).await;
        assert!(!store.is_authenticated());

        store.set_auth(user(), "jwt".to_owned()).await.unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.token(), Some("jwt"));

        let raw = storage.raw("auth-storage").await.unwrap();
        assert!(raw.contains(r#""isAuthenticated":true"#));
        assert!(raw.contains(r#""version":0"#));

        let reloaded = AuthStore::load(storage.clone()).await;
        assert_eq!(reloaded.user().map(|u| u.name.as_str()), Some("Ada"));

        store.logout().await.unwrap();
        assert!(!store.is_authenticated());
        assert!(storage.raw("auth-storage").await.is_none());
        let reloaded = AuthStore::load(storage).await;
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.user().is_none());
        assert!(reloaded.token().is_none());
    }

    #[tokio::test]
    async fn test_inconsistent_snapshot_is_signed_out() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "auth-storage",
                r#"{"state":{"user":null,"token":"jwt","isAuthenticated":true},"version":0}"#
                    .to_owned(),
            )
            .await
            .unwrap();

        let store = AuthStore::load(storage).await;
        assert!(!store.is_authenticated());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let state = AuthState {
            user: None,
            token: Some("super-secret-jwt".to_owned()),
            is_authenticated: false,
        };
        assert!(!format!("{state:?}").contains("super-secret-jwt"));
    }
}
