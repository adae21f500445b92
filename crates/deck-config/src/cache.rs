//! Cache behavior configuration.

use serde::{Deserialize, Serialize};

/// Timeout applied to each cache-miss fetch, in seconds.
const fn default_fetch_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Optional wall-clock TTL for cached entries, in seconds.
    ///
    /// `None` (the default) means entries never expire by time within a
    /// session — explicit invalidation after writes is the freshness
    /// mechanism. A TTL is a safety net only.
    #[serde(default)]
    pub ttl_secs: Option<u64>,

    /// Timeout for a single fetch triggered by a cache miss. There is no
    /// automatic retry; a timeout surfaces to the waiting readers.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: None,
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}
