//! Backend gateway connection configuration.

use serde::{Deserialize, Serialize};

fn default_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

/// Request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend gateway.
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-request timeout in seconds. No automatic retries are performed;
    /// a timed-out request surfaces as a transport error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
