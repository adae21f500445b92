//! # deck-gateway
//!
//! HTTP client for the taskdeck backend gateway.
//!
//! The backend owns persistence and all authorization decisions; this crate
//! only speaks its REST surface:
//! - auth (`/api/auth/*`): login, register, identity, permission checks,
//!   organization switching
//! - entity collections (`/api/tasks|users|roles`), scoped by
//!   `?organizationId=`
//! - task comments (`/api/tasks/{id}/comments`)
//! - organization lifecycle (`/api/organization*`): creation, invites
//!
//! Every endpoint answers the uniform envelope, decoded in one place;
//! failures are classified into [`GatewayError`] so callers branch on
//! variants, never on raw status codes. Requests carry an opaque bearer
//! token when one is set; there are no automatic retries.

pub mod auth;
mod decode;
mod error;
pub mod org;
pub mod roles;
pub mod tasks;
pub mod token_store;
pub mod users;

pub use error::GatewayError;
pub use org::InviteOutcome;

use deck_config::BackendConfig;
use tokio::sync::RwLock;

/// Client for the backend gateway.
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl Gateway {
    /// Create a gateway client for the configured backend.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent("taskdeck/0.1")
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .expect("reqwest client should build"),
            base_url: config.url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    /// Replace the bearer token attached to subsequent requests.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// Whether a bearer token is currently set.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Attach the bearer token, if any, to a request.
    pub(crate) async fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn get(&self, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(path, "gateway GET");
        self.authorize(self.http.get(self.url(path))).await
    }

    pub(crate) async fn post(&self, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(path, "gateway POST");
        self.authorize(self.http.post(self.url(path))).await
    }

    pub(crate) async fn put(&self, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(path, "gateway PUT");
        self.authorize(self.http.put(self.url(path))).await
    }

    pub(crate) async fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(path, "gateway DELETE");
        self.authorize(self.http.delete(self.url(path))).await
    }
}
