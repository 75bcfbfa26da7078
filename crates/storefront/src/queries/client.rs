use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, warn};

use super::{CacheValue, Cached, QueryKey, QueryState};
use crate::backend::BackendError;
use crate::config::QueryCacheConfig;

/// How long an invalidation is remembered for reads that were in flight.
const INVALIDATION_MEMORY: Duration = Duration::from_secs(300);

/// Shared cache of backend reads.
///
/// Cheap to clone; clones share the cache. Concurrent reads of one key wait
/// on a single fetch. A fetch whose key is invalidated while it is in flight
/// still answers its callers but is evicted once it lands.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<QueryClientInner>,
}

struct QueryClientInner {
    cache: Cache<QueryKey, CacheValue>,
    /// Bumped on every invalidation.
    epoch: AtomicU64,
    /// Epoch of the latest invalidation of each prefix.
    invalidations: Cache<QueryKey, u64>,
}

impl QueryClient {
    #[must_use]
    pub fn new(config: &QueryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .support_invalidation_closures()
            .build();

        let invalidations = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(INVALIDATION_MEMORY)
            .build();

        Self {
            inner: Arc::new(QueryClientInner {
                cache,
                epoch: AtomicU64::new(0),
                invalidations,
            }),
        }
    }

    /// Cached value for `key`, or the result of `init`.
    ///
    /// # Errors
    ///
    /// Returns the error `init` failed with, shared with every caller that
    /// waited on the same fetch. Failures are not cached.
    ///
    /// Only the caller whose `init` ran checks for an invalidation that
    /// landed during the fetch.
    pub async fn fetch<F>(&self, key: QueryKey, init: F) -> Result<CacheValue, Arc<BackendError>>
    where
        F: Future<Output = Result<CacheValue, BackendError>>,
    {
        // Set only when this caller's `init` runs; hits and waiters leave it empty.
        let started = OnceLock::new();
        let value = self
            .inner
            .cache
            .try_get_with(key.clone(), async {
                started.get_or_init(|| self.inner.epoch.load(Ordering::Acquire));
                init.await
            })
            .await?;

        if let Some(&started) = started.get()
            && self.invalidated_since(&key, started).await
        {
            debug!(key = %key, "Dropping result invalidated while in flight");
            self.inner.cache.invalidate(&key).await;
        }

        Ok(value)
    }

    /// Typed read through the cache.
    pub async fn read<T, F>(&self, key: QueryKey, fetch: F) -> QueryState<Arc<T>>
    where
        T: Cached,
        F: Future<Output = Result<T, BackendError>>,
    {
        let result = self
            .fetch(key.clone(), async move {
                fetch.await.map(|value| T::wrap(Arc::new(value)))
            })
            .await;

        match result {
            Ok(value) => match T::unwrap(value) {
                Some(data) => QueryState::from_result(Ok(data)),
                None => {
                    warn!(key = %key, "Cached value has an unexpected type");
                    self.inner.cache.invalidate(&key).await;
                    QueryState::idle()
                }
            },
            Err(error) => {
                warn!(key = %key, error = %error, "Query failed");
                QueryState::from_result(Err(error))
            }
        }
    }

    /// Currently cached value for `key`, without fetching.
    pub async fn get(&self, key: &QueryKey) -> Option<CacheValue> {
        self.inner.cache.get(key).await
    }

    /// Drop every cached entry whose key starts with `prefix`.
    pub async fn invalidate(&self, prefix: &QueryKey) {
        let epoch = self.inner.epoch.fetch_add(1, Ordering::AcqRel) + 1;
        self.inner
            .invalidations
            .insert(prefix.clone(), epoch)
            .await;

        let owned = prefix.clone();
        if let Err(e) = self
            .inner
            .cache
            .invalidate_entries_if(move |key, _| key.starts_with(&owned))
        {
            warn!(prefix = %prefix, error = %e, "Predicate invalidation failed, clearing cache");
            self.inner.cache.invalidate_all();
        }

        debug!(prefix = %prefix, epoch, "Invalidated queries");
    }

    /// Drop every cached entry.
    pub async fn invalidate_all(&self) {
        self.inner.epoch.fetch_add(1, Ordering::AcqRel);
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    async fn invalidated_since(&self, key: &QueryKey, started: u64) -> bool {
        for prefix in key.prefixes() {
            if let Some(epoch) = self.inner.invalidations.get(&prefix).await
                && epoch > started
            {
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use tokio::sync::Notify;

    use super::*;

    fn client() -> QueryClient {
        QueryClient::new(&QueryCacheConfig::default())
    }

    fn categories(count: usize) -> Vec<crate::backend::Category> {
        (0..count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "id": i,
                    "name": format!("Category {i}"),
                    "slug": format!("category-{i}")
                }))
                .unwrap()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let client = client();
        let calls = AtomicUsize::new(0);
        let key = QueryKey::new("categories");

        for _ in 0..2 {
            let state = client
                .read(key.clone(), async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(categories(2))
                })
                .await;
            assert_eq!(state.data.unwrap().len(), 2);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let client = client();
        let calls = Arc::new(AtomicUsize::new(0));
        let release = Arc::new(Notify::new());
        let key = QueryKey::new("categories");

        let spawn_read = || {
            let client = client.clone();
            let calls = Arc::clone(&calls);
            let release = Arc::clone(&release);
            let key = key.clone();
            tokio::spawn(async move {
                client
                    .read(key, async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        release.notified().await;
                        Ok(categories(1))
                    })
                    .await
            })
        };

        let first = spawn_read();
        let second = spawn_read();
        tokio::time::sleep(Duration::from_millis(50)).await;
        release.notify_one();

        assert!(first.await.unwrap().data.is_some());
        assert!(second.await.unwrap().data.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let client = client();
        let key = QueryKey::new("categories");

        let failed = client
            .read::<Vec<crate::backend::Category>, _>(key.clone(), async {
                Err(BackendError::Api {
                    status: 503,
                    message: "down".to_owned(),
                })
            })
            .await;
        assert_eq!(failed.error.unwrap().status(), Some(503));

        let recovered = client.read(key, async { Ok(categories(1)) }).await;
        assert!(recovered.data.is_some());
    }

    #[tokio::test]
    async fn test_invalidate_by_prefix() {
        let client = client();
        let reviews = QueryKey::new("reviews").with("product").with(42);
        let other = QueryKey::new("reviews").with("product").with(43);
        let product = QueryKey::new("product").with(42);

        for key in [&reviews, &other, &product] {
            client
                .fetch(key.clone(), async {
                    Ok(CacheValue::Categories(Arc::new(Vec::new())))
                })
                .await
                .unwrap();
        }

        client.invalidate(&reviews).await;
        assert!(client.get(&reviews).await.is_none());
        assert!(client.get(&other).await.is_some());
        assert!(client.get(&product).await.is_some());

        client.invalidate(&QueryKey::new("reviews")).await;
        assert!(client.get(&other).await.is_none());
        assert!(client.get(&product).await.is_some());
    }

    #[tokio::test]
    async fn test_result_invalidated_in_flight_is_not_kept() {
        let client = client();
        let key = QueryKey::new("wishlist").with(7);
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let reader = {
            let client = client.clone();
            let key = key.clone();
            let started = Arc::clone(&started);
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                client
                    .read(key, async move {
                        started.notify_one();
                        release.notified().await;
                        Ok(categories(1))
                    })
                    .await
            })
        };

        started.notified().await;
        client.invalidate(&QueryKey::new("wishlist").with(7)).await;
        release.notify_one();

        let state = reader.await.unwrap();
        assert!(state.data.is_some());
        assert!(client.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_hits_keep_a_value_fetched_after_invalidation() {
        let client = client();
        let key = QueryKey::new("wishlist").with(7);
        let calls = Arc::new(AtomicUsize::new(0));
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let spawn_read = || {
            let client = client.clone();
            let key = key.clone();
            let calls = Arc::clone(&calls);
            let started = Arc::clone(&started);
            let release = Arc::clone(&release);
            tokio::spawn(async move {
                client
                    .read(key, async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        started.notify_one();
                        release.notified().await;
                        Ok(categories(1))
                    })
                    .await
            })
        };

        let stale = spawn_read();
        started.notified().await;
        let waiter = spawn_read();
        tokio::time::sleep(Duration::from_millis(50)).await;
        client.invalidate(&QueryKey::new("wishlist")).await;
        release.notify_one();

        assert!(stale.await.unwrap().data.is_some());
        assert!(waiter.await.unwrap().data.is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(client.get(&key).await.is_none());

        let fresh = client
            .read(key.clone(), async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(categories(2))
            })
            .await;
        assert_eq!(fresh.data.unwrap().len(), 2);

        for _ in 0..2 {
            let hit = client
                .read(key.clone(), async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(categories(3))
                })
                .await;
            assert_eq!(hit.data.unwrap().len(), 2);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(client.get(&key).await.is_some());
    }
}
