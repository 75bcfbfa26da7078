//! Cached backend reads and the mutations that invalidate them.
//!
//! Every read is identified by a [`QueryKey`], an ordered tuple of segments
//! such as `["products", "featured"]`. The [`QueryClient`] keeps one cache
//! entry per key, shares a single in-flight request between concurrent
//! readers of the same key, and drops every entry under a key prefix when a
//! mutation invalidates it.
//!
//! [`Queries`] is the typed surface page handlers use: one method per read,
//! each returning a [`QueryState`], plus the mutations.

mod cache;
mod client;
mod hooks;
pub mod keys;
mod mutations;
mod observer;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::backend::BackendError;
use crate::stores::StoreError;

pub use cache::{CacheValue, Cached};
pub use client::QueryClient;
pub use hooks::Queries;
pub use observer::QueryObserver;

/// Identity of a cached read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    #[must_use]
    pub fn new(resource: impl Into<String>) -> Self {
        Self(vec![resource.into()])
    }

    /// Append a segment.
    #[must_use]
    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    /// Append an optional segment; `None` becomes an empty segment so that
    /// positions stay stable.
    #[must_use]
    pub fn with_opt(self, segment: Option<impl ToString>) -> Self {
        match segment {
            Some(value) => self.with(value),
            None => self.with(""),
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether `prefix` matches the leading segments of this key.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Every non-empty prefix of this key, shortest first, ending with the
    /// key itself.
    pub fn prefixes(&self) -> impl Iterator<Item = Self> + '_ {
        (1..=self.0.len()).map(|len| Self(self.0[..len].to_vec()))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("-"))
    }
}

/// Result of a read as seen by a page.
#[derive(Debug, Clone)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<Arc<BackendError>>,
}

impl<T> QueryState<T> {
    /// A disabled read that issued no request.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }

    #[must_use]
    pub fn from_result(result: Result<T, Arc<BackendError>>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                is_loading: false,
                error: None,
            },
            Err(error) => Self {
                data: None,
                is_loading: false,
                error: Some(error),
            },
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryState<U> {
        QueryState {
            data: self.data.map(f),
            is_loading: self.is_loading,
            error: self.error,
        }
    }

    /// `Err` when the read failed, otherwise the data if any.
    ///
    /// # Errors
    ///
    /// Returns the backend error the read failed with.
    pub fn into_result(self) -> Result<Option<T>, Arc<BackendError>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Errors from a mutation.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The mutation needs a signed-in visitor.
    #[error("Not signed in")]
    Unauthenticated,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display_and_prefix() {
        let key = QueryKey::new("reviews").with("product").with(42);
        assert_eq!(key.to_string(), "reviews-product-42");
        assert!(key.starts_with(&QueryKey::new("reviews")));
        assert!(key.starts_with(&key));
        assert!(!key.starts_with(&QueryKey::new("reviews").with("article")));
        assert!(!QueryKey::new("reviews").starts_with(&key));
    }

    #[test]
    fn test_prefixes() {
        let key = QueryKey::new("a").with("b").with("c");
        let prefixes: Vec<String> = key.prefixes().map(|k| k.to_string()).collect();
        assert_eq!(prefixes, ["a", "a-b", "a-b-c"]);
    }

    #[test]
    fn test_optional_segments_keep_positions() {
        let key = QueryKey::new("products")
            .with_opt(Some(2))
            .with_opt(None::<u32>)
            .with_opt(Some("lighting"));
        assert_eq!(key.segments(), ["products", "2", "", "lighting"]);
    }

    #[test]
    fn test_state_from_result() {
        let ok = QueryState::from_result(Ok::<_, Arc<BackendError>>(3));
        assert_eq!(ok.data, Some(3));
        assert!(!ok.is_loading);

        let err = QueryState::<u8>::from_result(Err(Arc::new(BackendError::Api {
            status: 500,
            message: "boom".to_owned(),
        })));
        assert!(err.data.is_none());
        assert!(err.into_result().is_err());

        let idle = QueryState::<u8>::idle();
        assert!(!idle.is_loading);
        assert_eq!(idle.into_result().unwrap(), None);
    }
}
