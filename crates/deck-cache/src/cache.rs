//! Organization-scoped cache for one entity kind.
//!
//! Keys are `(organization, entity id)` with `id = None` meaning the list
//! of the whole collection; the kind itself is fixed per cache instance
//! (see `CacheRegistry`), so two organizations can never share an entry
//! even when entity ids collide.

use std::sync::Arc;
use std::time::Duration;

use deck_core::Keyed;
use deck_config::CacheConfig;

use crate::error::CacheError;
use crate::state::{EntryStatus, KeyedState};

pub struct ScopedCache<V, E> {
    lists: KeyedState<String, Arc<Vec<V>>, E>,
    items: KeyedState<(String, String), Arc<V>, E>,
}

impl<V, E> ScopedCache<V, E>
where
    V: Clone,
{
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let ttl = config.ttl_secs.map(Duration::from_secs);
        let fetch_timeout = Duration::from_secs(config.fetch_timeout_secs);
        Self {
            lists: KeyedState::new(ttl, fetch_timeout),
            items: KeyedState::new(ttl, fetch_timeout),
        }
    }

    /// The collection for one organization. Joins an in-flight fetch for
    /// the same key if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] wrapping the fetch error or a timeout; the
    /// error is recorded on this key only and the next read re-fetches.
    pub async fn get_list<F, Fut>(&self, org: &str, fetch: F) -> Result<Arc<Vec<V>>, CacheError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<V>, E>>,
    {
        self.lists
            .get_or_fetch(org.to_string(), || async { fetch().await.map(Arc::new) })
            .await
    }

    /// A single entity. Served from the item entry when fresh; otherwise
    /// seeded from a fresh list entry containing the id (saving a fetch)
    /// without persisting the seed, so invalidating the list also stops
    /// seeding; otherwise fetched.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] wrapping the fetch error or a timeout.
    pub async fn get_item<F, Fut>(
        &self,
        org: &str,
        id: &str,
        fetch: F,
    ) -> Result<Arc<V>, CacheError<E>>
    where
        V: Keyed,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = (org.to_string(), id.to_string());
        // Seed only keys the cache has never seen: an explicitly
        // invalidated item entry must revalidate against the backend.
        if self.items.status(&key).await.is_none() {
            if let Some(list) = self.lists.peek(&org.to_string()).await {
                if let Some(found) = list.iter().find(|v| v.key() == id) {
                    tracing::debug!(org, id, "item read seeded from fresh list");
                    return Ok(Arc::new(found.clone()));
                }
            }
        }
        self.items.get_or_fetch(key, || async { fetch().await.map(Arc::new) }).await
    }

    /// Mark the organization's list entry stale.
    pub async fn invalidate_list(&self, org: &str) {
        tracing::debug!(org, "invalidate list");
        self.lists.invalidate(&org.to_string()).await;
    }

    /// Mark one item entry stale.
    pub async fn invalidate_item(&self, org: &str, id: &str) {
        tracing::debug!(org, id, "invalidate item");
        self.items.invalidate(&(org.to_string(), id.to_string())).await;
    }

    /// Mark every entry scoped to one organization stale.
    pub async fn invalidate_org(&self, org: &str) {
        self.lists.invalidate(&org.to_string()).await;
        self.items.invalidate_matching(|(o, _)| o == org).await;
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.lists.clear().await;
        self.items.clear().await;
    }

    /// Status of the list entry, if any.
    pub async fn list_status(&self, org: &str) -> Option<EntryStatus> {
        self.lists.status(&org.to_string()).await
    }

    /// Status of an item entry, if any.
    pub async fn item_status(&self, org: &str, id: &str) -> Option<EntryStatus> {
        self.items.status(&(org.to_string(), id.to_string())).await
    }
}
