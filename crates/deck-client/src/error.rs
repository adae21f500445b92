//! Client-level error type.

use deck_cache::CacheError;
use deck_gateway::GatewayError;
use thiserror::Error;

/// Errors surfaced by session and handle operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A direct gateway call failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A cached read failed (shared fetch error or timeout).
    #[error(transparent)]
    Cache(#[from] CacheError<GatewayError>),

    /// The operation needs an active organization but the session has
    /// none (not logged in, or the identity has no memberships).
    #[error("no active organization")]
    NoOrganization,
}

impl ClientError {
    /// The underlying gateway error, when one exists, so callers can
    /// branch on the taxonomy (validation vs. forbidden vs. not-found vs.
    /// transport) regardless of whether the call went through the cache.
    #[must_use]
    pub fn gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(error) => Some(error),
            Self::Cache(cache_error) => cache_error.fetch_error(),
            Self::NoOrganization => None,
        }
    }
}
