//! Asynchronously resolved permission decisions, cached per organization.
//!
//! The gate holds no policy: it caches yes/no answers from the backend's
//! authorization endpoint, keyed by the *sorted* action and resource sets
//! plus the organization id, so two views asking the same question within
//! a session share one decision. Per key the state machine is
//! `Unknown -> Allowed | Denied` on fetch success and back to `Unknown` on
//! invalidation; nothing else.

use std::collections::BTreeSet;
use std::time::Duration;

use deck_config::CacheConfig;

use crate::error::CacheError;
use crate::state::KeyedState;

/// Tri-state permission answer. `Unknown` means "not yet resolved" and is
/// distinct from a resolved `Denied` — render nothing, not a refusal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Unknown,
    Allowed,
    Denied,
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

impl From<bool> for Decision {
    fn from(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QuestionKey {
    org: String,
    question: String,
}

/// Canonical form of a permission question: sorted, deduplicated,
/// comma-joined action and resource sets.
fn canonical(actions: &[String], resources: &[String]) -> String {
    let actions: BTreeSet<&str> = actions.iter().map(String::as_str).collect();
    let resources: BTreeSet<&str> = resources.iter().map(String::as_str).collect();
    let actions = actions.into_iter().collect::<Vec<_>>().join(",");
    let resources = resources.into_iter().collect::<Vec<_>>().join(",");
    format!("{actions}|{resources}")
}

pub struct PermissionGate<E> {
    decisions: KeyedState<QuestionKey, bool, E>,
}

impl<E> PermissionGate<E> {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            decisions: KeyedState::new(
                config.ttl_secs.map(Duration::from_secs),
                Duration::from_secs(config.fetch_timeout_secs),
            ),
        }
    }

    /// Current decision without fetching: `Unknown` until a resolve for
    /// this key has completed within the session.
    pub async fn peek(&self, org: &str, actions: &[String], resources: &[String]) -> Decision {
        let key = QuestionKey {
            org: org.to_string(),
            question: canonical(actions, resources),
        };
        match self.decisions.peek(&key).await {
            Some(allowed) => Decision::from(allowed),
            None => Decision::Unknown,
        }
    }

    /// Resolve the question, fetching from the backend at most once per
    /// key per session (concurrent identical questions join the in-flight
    /// fetch).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the fetch fails; the decision for this
    /// key stays observable as `Unknown` and the next resolve re-asks.
    pub async fn resolve<F, Fut>(
        &self,
        org: &str,
        actions: &[String],
        resources: &[String],
        fetch: F,
    ) -> Result<Decision, CacheError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<bool, E>>,
    {
        let key = QuestionKey {
            org: org.to_string(),
            question: canonical(actions, resources),
        };
        let allowed = self.decisions.get_or_fetch(key, fetch).await?;
        Ok(Decision::from(allowed))
    }

    /// Forget every decision scoped to one organization (role edits,
    /// membership changes).
    pub async fn invalidate_org(&self, org: &str) {
        self.decisions.invalidate_matching(|key| key.org == org).await;
    }

    /// Forget everything (organization switch, logout).
    pub async fn clear(&self) {
        self.decisions.clear().await;
    }
}
