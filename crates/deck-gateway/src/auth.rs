//! `/api/auth/*` endpoints: identity, credentials, permission checks,
//! organization switching.

use deck_core::Identity;
use serde::Deserialize;

use crate::Gateway;
use crate::decode::decode;
use crate::error::GatewayError;

/// Payload of the token-issuing endpoints (login, switch-organization).
#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    pub token: String,
}

/// Payload of a successful registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
    pub user_id: String,
}

impl Gateway {
    /// Fetch the authenticated identity for the current token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the token is missing or rejected,
    /// or the usual transport/parse variants. Soft-failing this into `None`
    /// is the session layer's job, not the gateway's.
    pub async fn me(&self) -> Result<Identity, GatewayError> {
        let resp = self.post("/api/auth/me").await.send().await?;
        decode(resp).await
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for bad credentials (envelope
    /// 400) and [`GatewayError::Auth`] for 401.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenData, GatewayError> {
        let resp = self
            .post("/api/auth/login")
            .await
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        decode(resp).await
    }

    /// Register a new account. Password confirmation is validated by the
    /// session layer before this is ever called.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the backend rejects the
    /// registration (e.g. email already taken).
    pub async fn register(&self, email: &str, password: &str) -> Result<Registered, GatewayError> {
        let resp = self
            .post("/api/auth/register")
            .await
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        decode(resp).await
    }

    /// Ask the backend whether the current identity may perform every
    /// action in `actions` on every resource in `resources` within its
    /// active organization. The policy lives entirely server-side.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure;
    /// 401/403 map to [`GatewayError::Auth`].
    pub async fn check_permissions(
        &self,
        actions: &[String],
        resources: &[String],
    ) -> Result<bool, GatewayError> {
        let resp = self
            .post("/api/auth/checkPermissions")
            .await
            .json(&serde_json::json!({ "actions": actions, "resources": resources }))
            .send()
            .await?;
        decode(resp).await
    }

    /// Switch the active organization. The backend re-issues a token whose
    /// identity carries the new `isCurrent` membership.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the identity is not a member of
    /// `organization_id`.
    pub async fn switch_organization(
        &self,
        organization_id: &str,
    ) -> Result<TokenData, GatewayError> {
        let resp = self
            .post("/api/auth/switch-organization")
            .await
            .json(&serde_json::json!({ "organizationId": organization_id }))
            .send()
            .await?;
        decode(resp).await
    }

    /// Invalidate the session server-side.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the request cannot be sent;
    /// envelope failures are ignored (logout is best-effort).
    pub async fn logout(&self) -> Result<(), GatewayError> {
        let resp = self.post("/api/auth/logout").await.send().await?;
        // A failure envelope here means the session was already gone.
        if let Err(error) = decode::<serde_json::Value>(resp).await {
            tracing::debug!(%error, "logout envelope ignored");
        }
        Ok(())
    }
}
