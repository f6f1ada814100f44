//! [`QueryCache`] of the backend responses.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
    future::Future,
    hash::{Hash, Hasher as _},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{sync::OnceCell, time::Instant};
use tracing as log;
use xxhash_rust::xxh3::Xxh3;

use crate::api::Endpoint;

/// Key of a [`QueryCache`] entry.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// Resource the cached value belongs to.
    resource: &'static str,

    /// Type of the query.
    of: TypeId,

    /// Hash of the query parameters.
    hash: u64,
}

impl Key {
    /// Creates a new [`Key`] of the provided [`Endpoint`] call.
    #[must_use]
    pub fn of<E: Endpoint + Hash + 'static>(endpoint: &E) -> Self {
        let mut hasher = Xxh3::new();
        endpoint.hash(&mut hasher);
        Self {
            resource: E::RESOURCE,
            of: TypeId::of::<E>(),
            hash: hasher.finish(),
        }
    }

    /// Returns the resource of this [`Key`].
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }
}

/// Value stored in a [`QueryCache`] along with the time it was fetched at.
type Value = (Instant, Arc<dyn Any + Send + Sync>);

/// Cache of query results.
///
/// - Concurrent fetches of the same [`Key`] share a single in-flight
///   request.
/// - Values older than the stale time are refetched on the next access.
/// - Values are invalidated by resource prefix once a mutation touches it.
///
/// Clones share the same entries.
#[derive(Clone, Debug)]
pub struct QueryCache {
    /// Cached entries.
    entries: Arc<Mutex<HashMap<Key, Arc<OnceCell<Value>>>>>,

    /// Age after which a cached value is refetched.
    stale_time: Duration,
}

impl QueryCache {
    /// Creates a new empty [`QueryCache`] with the provided stale time.
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self {
            entries: Arc::default(),
            stale_time,
        }
    }

    /// Returns the value cached under the provided [`Key`], running the
    /// provided `fetch` if there is no fresh one.
    ///
    /// A failed `fetch` leaves nothing cached.
    ///
    /// # Errors
    ///
    /// If the `fetch` fails.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    pub async fn fetch<T, E, F, Fut>(&self, key: Key, fetch: F) -> Result<T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = {
            let mut entries =
                self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            let cell = entries.entry(key).or_default();
            if cell
                .get()
                .is_some_and(|(at, _)| at.elapsed() >= self.stale_time)
            {
                log::debug!("`{}` query is stale, refetching", key.resource);
                *cell = Arc::default();
            }
            Arc::clone(cell)
        };

        let (_, value) = cell
            .get_or_try_init(|| async {
                let value: Arc<dyn Any + Send + Sync> = Arc::new(fetch().await?);
                Ok::<Value, E>((Instant::now(), value))
            })
            .await?;

        // `Key` includes the query type, which determines the value type.
        Ok(value
            .downcast_ref::<T>()
            .expect("infallible")
            .clone())
    }

    /// Drops every entry whose resource starts with the provided prefix.
    ///
    /// In-flight fetches still complete for their waiters, but their values
    /// are not cached.
    ///
    /// Returns the number of dropped entries.
    pub fn invalidate(&self, prefix: &str) -> usize {
        let mut entries =
            self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|key, _| !key.resource.starts_with(prefix));
        let dropped = before - entries.len();
        if dropped > 0 {
            log::debug!("invalidated {dropped} `{prefix}` queries");
        }
        dropped
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[cfg(test)]
mod spec {
    use std::{
        convert::Infallible,
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use crate::api::{clients, dashboard};

    use super::{Key, QueryCache};

    async fn count(calls: &AtomicUsize) -> Result<usize, Infallible> {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok(calls.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[test]
    fn key_depends_on_parameters() {
        assert_eq!(
            Key::of(&clients::Get("c1".into())),
            Key::of(&clients::Get("c1".into())),
        );
        assert_ne!(
            Key::of(&clients::Get("c1".into())),
            Key::of(&clients::Get("c2".into())),
        );
        assert_eq!(Key::of(&dashboard::Get).resource(), "dashboard");
    }

    #[tokio::test(start_paused = true)]
    async fn deduplicates_in_flight_fetches() {
        let cache = QueryCache::new(Duration::from_secs(30));
        let calls = AtomicUsize::new(0);
        let key = Key::of(&dashboard::Get);

        let (a, b) = tokio::join!(
            cache.fetch(key, || count(&calls)),
            cache.fetch(key, || count(&calls)),
        );

        assert_eq!((a.unwrap(), b.unwrap()), (1, 1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refetches_stale_values() {
        let cache = QueryCache::new(Duration::from_secs(30));
        let calls = AtomicUsize::new(0);
        let key = Key::of(&dashboard::Get);

        assert_eq!(cache.fetch(key, || count(&calls)).await.unwrap(), 1);
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(cache.fetch(key, || count(&calls)).await.unwrap(), 1);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(cache.fetch(key, || count(&calls)).await.unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidates_by_resource_prefix() {
        let cache = QueryCache::new(Duration::from_secs(30));
        let calls = AtomicUsize::new(0);
        let client = Key::of(&clients::Get("c1".into()));
        let dashboard = Key::of(&dashboard::Get);

        _ = cache.fetch(client, || count(&calls)).await;
        _ = cache.fetch(dashboard, || count(&calls)).await;

        assert_eq!(cache.invalidate("clients"), 1);
        assert_eq!(cache.fetch(client, || count(&calls)).await.unwrap(), 3);
        assert_eq!(cache.fetch(dashboard, || count(&calls)).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(30));
        let key = Key::of(&dashboard::Get);

        let res: Result<u8, &str> = cache.fetch(key, || async { Err("down") }).await;
        assert_eq!(res, Err("down"));

        let res: Result<u8, &str> = cache.fetch(key, || async { Ok(7) }).await;
        assert_eq!(res, Ok(7));
    }
}
