use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{PersistedStore, Storage, StoreError, StoreState};

/// Color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub sidebar_open: bool,
    pub theme: Theme,
}

impl StoreState for UiState {
    const STORAGE_KEY: &'static str = "ui-storage";
}

/// Sidebar and theme preferences.
#[derive(Debug)]
pub struct UiStore<S> {
    inner: PersistedStore<UiState, S>,
}

impl<S: Storage> UiStore<S> {
    pub async fn load(storage: S) -> Self {
        Self {
            inner: PersistedStore::rehydrate(storage).await,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        self.inner.state()
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn set_sidebar_open(&mut self, open: bool) -> Result<(), StoreError> {
        self.inner.update(|state| state.sidebar_open = open).await
    }

    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub async fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.inner.update(|state| state.theme = theme).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::stores::MemoryStorage;

    #[tokio::test]
    async fn test_preferences_persist() {
        let storage = MemoryStorage::new();
        let mut store = UiStore::load(storage.clone()).await;
        assert_eq!(store.state(), &UiState::default());

        store.set_theme(Theme::Dark).await.unwrap();
        store.set_sidebar_open(true).await.unwrap();
        assert_eq!(
            storage.raw("ui-storage").await.as_deref(),
            Some(r#"{"state":{"sidebarOpen":true,"theme":"dark"},"version":0}"#)
        );

        let reloaded = UiStore::load(storage).await;
        assert_eq!(reloaded.state().theme, Theme::Dark);
        assert!(reloaded.state().sidebar_open);
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }
}
