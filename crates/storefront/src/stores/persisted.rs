use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{Storage, StoreError};

/// State held by a persisted store.
pub trait StoreState: Serialize + DeserializeOwned + Default + Send + Sync {
    /// Key the snapshot is stored under.
    const STORAGE_KEY: &'static str;

    /// Snapshot version. Snapshots with any other version are discarded.
    const VERSION: u32 = 0;
}

#[derive(Deserialize)]
struct Snapshot<T> {
    state: T,
    version: u32,
}

#[derive(Serialize)]
struct SnapshotRef<'a, T> {
    state: &'a T,
    version: u32,
}

/// A store bound to its storage.
///
/// Rehydrated in full by [`Self::rehydrate`]; every mutation through
/// [`Self::update`] writes the whole snapshot back.
#[derive(Debug)]
pub struct PersistedStore<T, S> {
    storage: S,
    state: T,
}

impl<T: StoreState, S: Storage> PersistedStore<T, S> {
    /// Load the snapshot from `storage`.
    ///
    /// A missing, unreadable or different-version snapshot yields the
    /// default state.
    pub async fn rehydrate(storage: S) -> Self {
        let state = match storage.get_item(T::STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Snapshot<T>>(&raw) {
                Ok(snapshot) if snapshot.version == T::VERSION => snapshot.state,
                Ok(snapshot) => {
                    tracing::warn!(
                        key = T::STORAGE_KEY,
                        found = snapshot.version,
                        expected = T::VERSION,
                        "Discarding persisted store with unknown version"
                    );
                    T::default()
                }
                Err(e) => {
                    tracing::warn!(key = T::STORAGE_KEY, error = %e, "Discarding unreadable persisted store");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = T::STORAGE_KEY, error = %e, "Failed to read persisted store");
                T::default()
            }
        };

        Self { storage, state }
    }

    #[must_use]
    pub const fn state(&self) -> &T {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutate the state and persist the full snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written. The in-memory
    /// state keeps the mutation either way.
    pub async fn update<R>(&mut self, mutate: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let result = mutate(&mut self.state);
        self.persist().await?;
        Ok(result)
    }

    /// Reset to the default state and remove the persisted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.state = T::default();
        self.storage.remove_item(T::STORAGE_KEY).await
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&SnapshotRef {
            state: &self.state,
            version: T::VERSION,
        })?;
        self.storage.set_item(T::STORAGE_KEY, raw).await
    }
}
