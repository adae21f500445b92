//! Internal keyed fetch state: one slot per key, at most one fetch in
//! flight per key.
//!
//! Shared by the entity caches (list and item maps) and the permission
//! gate. Values are cheap clones (`Arc`, `bool`); errors fan out as
//! [`CacheError`].
//!
//! Generation counters guard the publish step: if a key is invalidated
//! while its fetch is in flight, the late result is delivered to the
//! readers that subscribed to it but is NOT written back into the map, so
//! a read issued after the invalidation always triggers a fresh fetch.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, watch};

use crate::error::CacheError;

/// Observable lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    /// A fetch for this key is in flight.
    Pending,
    /// A value is cached and servable.
    Fresh,
    /// The entry was invalidated; the next read re-fetches.
    Stale,
    /// The last fetch failed; the next read re-fetches.
    Error,
}

type FetchResult<T, E> = Result<T, CacheError<E>>;

enum State<T, E> {
    Pending {
        rx: watch::Receiver<Option<FetchResult<T, E>>>,
        generation: u64,
    },
    Fresh {
        value: T,
        fetched_at: Instant,
    },
    Stale,
    Error(CacheError<E>),
}

/// What the lock-phase decided a reader should do.
enum Action<T, E> {
    Hit(T),
    Wait(watch::Receiver<Option<FetchResult<T, E>>>),
    Own {
        tx: watch::Sender<Option<FetchResult<T, E>>>,
        generation: u64,
    },
}

pub struct KeyedState<K, T, E> {
    map: Mutex<HashMap<K, State<T, E>>>,
    ttl: Option<Duration>,
    fetch_timeout: Duration,
    next_generation: AtomicU64,
}

impl<K, T, E> KeyedState<K, T, E>
where
    K: Eq + Hash + Clone,
    T: Clone,
{
    pub fn new(ttl: Option<Duration>, fetch_timeout: Duration) -> Self {
        Self {
            map: Mutex::new(HashMap::new()),
            ttl,
            fetch_timeout,
            next_generation: AtomicU64::new(0),
        }
    }

    fn is_fresh(&self, fetched_at: Instant) -> bool {
        self.ttl.is_none_or(|ttl| fetched_at.elapsed() <= ttl)
    }

    /// Return the cached value for `key`, joining an in-flight fetch if one
    /// exists, or running `fetch` (under the configured timeout) otherwise.
    ///
    /// All concurrent readers of one key observe the identical value or the
    /// identical shared error.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> FetchResult<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let (tx, generation) = loop {
            let action = {
                let mut map = self.map.lock().await;
                match map.get(&key) {
                    Some(State::Fresh { value, fetched_at }) if self.is_fresh(*fetched_at) => {
                        Action::Hit(value.clone())
                    }
                    // Join the in-flight fetch unless its owner was dropped
                    // before publishing.
                    Some(State::Pending { rx, .. }) if rx.borrow().is_some() || rx.has_changed().is_ok() => {
                        Action::Wait(rx.clone())
                    }
                    // Miss, stale, expired, errored, or abandoned pending:
                    // this reader owns the fetch.
                    _ => {
                        let (tx, rx) = watch::channel(None);
                        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                        map.insert(key.clone(), State::Pending { rx, generation });
                        Action::Own { tx, generation }
                    }
                }
            };

            match action {
                Action::Hit(value) => return Ok(value),
                Action::Own { tx, generation } => break (tx, generation),
                Action::Wait(mut rx) => {
                    loop {
                        let published = rx.borrow_and_update().clone();
                        if let Some(result) = published {
                            return result;
                        }
                        if rx.changed().await.is_err() {
                            // Owner dropped without publishing; retry from
                            // the top.
                            break;
                        }
                    }
                }
            }
        };

        let result = match tokio::time::timeout(self.fetch_timeout, fetch()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(CacheError::Fetch(std::sync::Arc::new(error))),
            Err(_) => Err(CacheError::Timeout(self.fetch_timeout)),
        };

        {
            let mut map = self.map.lock().await;
            // Only publish into the map if this entry is still the pending
            // one we created; an invalidation mid-flight wins otherwise.
            let still_ours = matches!(
                map.get(&key),
                Some(State::Pending { generation: g, .. }) if *g == generation
            );
            if still_ours {
                match &result {
                    Ok(value) => {
                        map.insert(
                            key,
                            State::Fresh {
                                value: value.clone(),
                                fetched_at: Instant::now(),
                            },
                        );
                    }
                    Err(error) => {
                        map.insert(key, State::Error(error.clone()));
                    }
                }
            }
        }

        let _ = tx.send(Some(result.clone()));
        result
    }

    /// Serve the value only if a fresh entry exists; never fetches.
    pub async fn peek(&self, key: &K) -> Option<T> {
        let map = self.map.lock().await;
        match map.get(key) {
            Some(State::Fresh { value, fetched_at }) if self.is_fresh(*fetched_at) => {
                Some(value.clone())
            }
            _ => None,
        }
    }

    /// Observable status of the entry, if any.
    pub async fn status(&self, key: &K) -> Option<EntryStatus> {
        let map = self.map.lock().await;
        map.get(key).map(|state| match state {
            State::Pending { .. } => EntryStatus::Pending,
            State::Fresh { fetched_at, .. } => {
                if self.is_fresh(*fetched_at) {
                    EntryStatus::Fresh
                } else {
                    EntryStatus::Stale
                }
            }
            State::Stale => EntryStatus::Stale,
            State::Error(_) => EntryStatus::Error,
        })
    }

    /// Mark the entry stale so the next read re-fetches. A pending entry is
    /// detached instead: its waiters still receive the in-flight result,
    /// but the result is not written back.
    pub async fn invalidate(&self, key: &K) {
        let mut map = self.map.lock().await;
        match map.get(key) {
            None => {}
            Some(State::Pending { .. }) => {
                map.remove(key);
            }
            Some(_) => {
                map.insert(key.clone(), State::Stale);
            }
        }
    }

    /// Invalidate every key matching the predicate.
    pub async fn invalidate_matching(&self, mut predicate: impl FnMut(&K) -> bool) {
        let mut map = self.map.lock().await;
        let keys: Vec<K> = map.keys().filter(|k| predicate(k)).cloned().collect();
        for key in keys {
            if matches!(map.get(&key), Some(State::Pending { .. })) {
                map.remove(&key);
            } else {
                map.insert(key, State::Stale);
            }
        }
    }

    /// Drop every entry (the cold-restart policy for organization switch
    /// and logout).
    pub async fn clear(&self) {
        self.map.lock().await.clear();
    }
}
