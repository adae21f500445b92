//! Cache error type.
//!
//! The fetch error `E` (typically the gateway error) is carried behind an
//! `Arc` so one failure can fan out to every reader waiting on the same
//! in-flight fetch without requiring `E: Clone`.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Error surfaced by a cache read.
#[derive(Debug, Error)]
pub enum CacheError<E> {
    /// The fetch did not complete within the configured timeout. There is
    /// no automatic retry; the next read triggers a fresh fetch.
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The fetch itself failed; the underlying error is shared by all
    /// readers that were waiting on it.
    #[error("{0}")]
    Fetch(Arc<E>),
}

impl<E> Clone for CacheError<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Timeout(duration) => Self::Timeout(*duration),
            Self::Fetch(error) => Self::Fetch(Arc::clone(error)),
        }
    }
}

impl<E> CacheError<E> {
    /// The underlying fetch error, if this was not a timeout.
    #[must_use]
    pub fn fetch_error(&self) -> Option<&E> {
        match self {
            Self::Fetch(error) => Some(error),
            Self::Timeout(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("backend said no")]
    struct Opaque;

    #[test]
    fn clone_does_not_require_error_clone() {
        let err: CacheError<Opaque> = CacheError::Fetch(Arc::new(Opaque));
        let cloned = err.clone();
        assert_eq!(cloned.to_string(), "backend said no");
        assert!(cloned.fetch_error().is_some());
    }

    #[test]
    fn timeout_display_names_duration() {
        let err: CacheError<Opaque> = CacheError::Timeout(Duration::from_secs(10));
        assert!(err.to_string().contains("10s"));
        assert!(err.fetch_error().is_none());
    }
}
