use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{Cached, QueryClient, QueryKey, QueryState};
use crate::backend::BackendError;

/// Follows one query whose key changes over time.
///
/// Setting a new key aborts the fetch for the previous key; a result that
/// still arrives for an older key is ignored. Setting the same key again is a
/// no-op. Subscribers see every state transition through a
/// [`watch::Receiver`].
pub struct QueryObserver<T> {
    client: QueryClient,
    state: Arc<watch::Sender<QueryState<Arc<T>>>>,
    generation: Arc<AtomicU64>,
    current: Mutex<Option<Observed>>,
}

struct Observed {
    key: QueryKey,
    task: JoinHandle<()>,
}

impl<T> QueryObserver<T>
where
    T: Cached + Send + Sync + 'static,
{
    #[must_use]
    pub fn new(client: QueryClient) -> Self {
        let (state, _) = watch::channel(QueryState::idle());
        Self {
            client,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            current: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QueryState<Arc<T>>> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> QueryState<Arc<T>> {
        self.state.borrow().clone()
    }

    /// Observe `key`, fetching with `fetch` unless it is already observed.
    ///
    /// `None` disables the query and resets the state to idle.
    pub fn set_query<F>(&self, key: Option<QueryKey>, fetch: F)
    where
        F: Future<Output = Result<T, BackendError>> + Send + 'static,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);

        if let (Some(observed), Some(key)) = (current.as_ref(), key.as_ref())
            && observed.key == *key
        {
            return;
        }

        if let Some(previous) = current.take() {
            previous.task.abort();
        }
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        let Some(key) = key else {
            self.state.send_replace(QueryState::idle());
            return;
        };

        self.state.send_replace(QueryState::loading());

        let client = self.client.clone();
        let state = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);
        let task_key = key.clone();
        let task = tokio::spawn(async move {
            let result = client.read(task_key.clone(), fetch).await;
            if latest.load(Ordering::Acquire) == generation {
                state.send_replace(result);
            } else {
                tracing::debug!(key = %task_key, "Ignoring result for a superseded key");
            }
        });

        *current = Some(Observed { key, task });
    }
}

impl<T> Drop for QueryObserver<T> {
    fn drop(&mut self) {
        let current = self
            .current
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(observed) = current.take() {
            observed.task.abort();
        }
    }
}
