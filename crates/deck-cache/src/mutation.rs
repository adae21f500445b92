//! Write coordination: perform a backend write, then invalidate exactly
//! the cache entries the write could have changed.
//!
//! Fire-and-settle: no optimistic patching of cached values. The backend
//! owns derived fields (computed role names and the like), so the policy
//! is to invalidate and re-fetch rather than guess — one extra round trip
//! per write, zero divergence. A failed write invalidates nothing and
//! returns the error unchanged, so callers keep the full gateway taxonomy
//! (validation vs. forbidden vs. not-found vs. transport).

use crate::cache::ScopedCache;

/// Run a create against the backend; on success, invalidate the
/// organization's list entry.
///
/// # Errors
///
/// Propagates the operation's error untouched; no invalidation happens.
pub async fn create<V, E, T>(
    cache: &ScopedCache<V, E>,
    org: &str,
    op: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    V: Clone,
{
    let created = op.await?;
    cache.invalidate_list(org).await;
    Ok(created)
}

/// Run an update against the backend; on success, invalidate both the
/// list entry and the item entry.
///
/// # Errors
///
/// Propagates the operation's error untouched; no invalidation happens.
pub async fn update<V, E, T>(
    cache: &ScopedCache<V, E>,
    org: &str,
    id: &str,
    op: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    V: Clone,
{
    let updated = op.await?;
    cache.invalidate_list(org).await;
    cache.invalidate_item(org, id).await;
    Ok(updated)
}

/// Run a delete against the backend; invalidation matches [`update`].
///
/// # Errors
///
/// Propagates the operation's error untouched; no invalidation happens.
pub async fn delete<V, E, T>(
    cache: &ScopedCache<V, E>,
    org: &str,
    id: &str,
    op: impl Future<Output = Result<T, E>>,
) -> Result<T, E>
where
    V: Clone,
{
    update(cache, org, id, op).await
}
