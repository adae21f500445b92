//! Session context: identity resolution, organization scope, and the auth
//! and organization flows.
//!
//! The active organization is the membership marked `isCurrent`; every
//! cached read and permission decision is scoped by it. Switching
//! organizations is a cold restart of all cached state rather than
//! incremental invalidation — a missed key there would leak one tenant's
//! data into another's view, so the simple policy is the safe one.

use std::sync::Arc;

use deck_cache::{CacheRegistry, Decision};
use deck_config::DeckConfig;
use deck_core::Identity;
use deck_gateway::auth::Registered;
use deck_gateway::{Gateway, GatewayError, InviteOutcome, token_store};
use tokio::sync::RwLock;

use crate::error::ClientError;

pub struct Session {
    pub(crate) gateway: Arc<Gateway>,
    pub(crate) caches: Arc<CacheRegistry<GatewayError>>,
    identity: RwLock<Option<Arc<Identity>>>,
    /// Whether issued tokens are persisted to the token store (keychain /
    /// file). Off by default so library use and tests never touch the
    /// user's credentials.
    persist_tokens: bool,
}

impl Session {
    #[must_use]
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            gateway: Arc::new(Gateway::new(&config.backend)),
            caches: Arc::new(CacheRegistry::new(&config.cache)),
            identity: RwLock::new(None),
            persist_tokens: false,
        }
    }

    /// Persist issued tokens via the token store and pick up a previously
    /// stored token, if any.
    #[must_use]
    pub async fn with_persistence(self) -> Self {
        if let Some(token) = token_store::load() {
            self.gateway.set_token(Some(token)).await;
        }
        Self {
            persist_tokens: true,
            ..self
        }
    }

    /// The authenticated identity, fetched once per session and cached.
    ///
    /// Soft-fails: any transport, parse, or auth error is logged and
    /// surfaced as `None` — callers branch on the option, never on an
    /// exception. An expired or missing token therefore reads as
    /// "logged out".
    pub async fn identity(&self) -> Option<Arc<Identity>> {
        if let Some(identity) = self.identity.read().await.clone() {
            return Some(identity);
        }
        match self.gateway.me().await {
            Ok(identity) => {
                let identity = Arc::new(identity);
                *self.identity.write().await = Some(Arc::clone(&identity));
                Some(identity)
            }
            Err(error) => {
                tracing::warn!(%error, "identity fetch soft-failed");
                None
            }
        }
    }

    /// The active organization id, if a logged-in identity has one.
    pub async fn current_org_id(&self) -> Option<String> {
        self.identity()
            .await
            .and_then(|identity| identity.current_org_id().map(str::to_string))
    }

    pub(crate) async fn require_org(&self) -> Result<String, ClientError> {
        self.current_org_id()
            .await
            .ok_or(ClientError::NoOrganization)
    }

    /// Exchange credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] or [`GatewayError::Auth`] for
    /// rejected credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), GatewayError> {
        let issued = self.gateway.login(email, password).await?;
        self.install_token(issued.token).await?;
        Ok(())
    }

    /// Register a new account.
    ///
    /// Mismatched passwords short-circuit with
    /// `Validation("Passwords do not match")` before any network call.
    /// Registration does not log in; the follow-up is either accepting a
    /// pending invite or creating an organization with the returned
    /// `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] on mismatch or backend
    /// rejection.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Registered, GatewayError> {
        if password != confirm_password {
            return Err(GatewayError::Validation("Passwords do not match".into()));
        }
        self.gateway.register(email, password).await
    }

    /// Create an organization for a freshly registered user and log into
    /// it. `invites` is the raw comma-separated form field; entries are
    /// trimmed and empties dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for rejected payloads.
    pub async fn create_organization(
        &self,
        user_id: &str,
        name: &str,
        invites: &str,
    ) -> Result<(), GatewayError> {
        let invites = parse_invites(invites);
        let issued = self
            .gateway
            .create_organization(user_id, name.trim(), invites.as_deref())
            .await?;
        self.install_token(issued.token).await?;
        Ok(())
    }

    /// Accept an invite token. `RegisterFirst` is a routing signal — send
    /// the caller to registration carrying the invite token — and only
    /// `Accepted` logs the session in.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for unknown or expired tokens.
    pub async fn accept_invite(&self, invite_token: &str) -> Result<InviteOutcome, GatewayError> {
        let outcome = self.gateway.accept_invite(invite_token).await?;
        if let InviteOutcome::Accepted { token } = &outcome {
            self.install_token(token.clone()).await?;
        }
        Ok(outcome)
    }

    /// Validate an invite token (e.g. to pre-fill the signup email).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] for unknown or expired tokens.
    pub async fn validate_invite(
        &self,
        invite_token: &str,
        for_register: bool,
    ) -> Result<deck_gateway::org::InviteDetails, GatewayError> {
        self.gateway.validate_invite(invite_token, for_register).await
    }

    /// Switch the active organization.
    ///
    /// On success the backend re-issues a token whose identity carries the
    /// new `isCurrent` membership, and every cache and permission decision
    /// is dropped — stale entries from the previous organization must not
    /// be observable under the new scope.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the identity is not a member of
    /// `organization_id`. Nothing is invalidated on failure.
    pub async fn switch_organization(&self, organization_id: &str) -> Result<(), GatewayError> {
        let issued = self.gateway.switch_organization(organization_id).await?;
        self.install_token(issued.token).await?;
        Ok(())
    }

    /// Log out: best-effort server-side invalidation, then drop the token,
    /// the stored credentials, the identity, and every cache.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TokenStore`] if stored credentials cannot
    /// be removed.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        if let Err(error) = self.gateway.logout().await {
            tracing::warn!(%error, "server-side logout failed; clearing local state anyway");
        }
        self.gateway.set_token(None).await;
        *self.identity.write().await = None;
        self.caches.clear().await;
        if self.persist_tokens {
            token_store::delete()?;
        }
        Ok(())
    }

    /// Resolved permission decision for the current identity and
    /// organization. Awaits the backend unless the question is already
    /// cached. 401/403 resolve to `Denied`; transport failures leave the
    /// question `Unknown`.
    pub async fn can(&self, actions: &[String], resources: &[String]) -> Decision {
        let Some(org) = self.current_org_id().await else {
            return Decision::Denied;
        };
        let gateway = Arc::clone(&self.gateway);
        let result = self
            .caches
            .permissions
            .resolve(&org, actions, resources, || {
                let actions = actions.to_vec();
                let resources = resources.to_vec();
                async move { gateway.check_permissions(&actions, &resources).await }
            })
            .await;
        match result {
            Ok(decision) => decision,
            Err(error) => {
                if error.fetch_error().is_some_and(GatewayError::is_auth) {
                    Decision::Denied
                } else {
                    tracing::warn!(%error, "permission check unresolved");
                    Decision::Unknown
                }
            }
        }
    }

    /// Non-blocking decision for render gating: `Unknown` until a resolve
    /// for the same question has completed within this session.
    pub async fn can_peek(&self, actions: &[String], resources: &[String]) -> Decision {
        let Some(org) = self.current_org_id().await else {
            return Decision::Unknown;
        };
        self.caches.permissions.peek(&org, actions, resources).await
    }

    /// Install a freshly issued token: swap it in, forget the previous
    /// identity, and cold-restart every cache (the token may carry a
    /// different organization scope).
    async fn install_token(&self, token: String) -> Result<(), GatewayError> {
        if self.persist_tokens {
            token_store::store(&token)?;
        }
        self.gateway.set_token(Some(token)).await;
        *self.identity.write().await = None;
        self.caches.clear().await;
        Ok(())
    }
}

/// Parse the comma-separated invites form field. Empty input means no
/// invites at all (the payload omits the field entirely).
fn parse_invites(raw: &str) -> Option<Vec<String>> {
    let invites: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    if invites.is_empty() { None } else { Some(invites) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn invites_are_trimmed_and_empties_dropped() {
        assert_eq!(
            parse_invites("x@y.com, z@w.com ,,"),
            Some(vec!["x@y.com".to_string(), "z@w.com".to_string()])
        );
        assert_eq!(parse_invites("x@y.com"), Some(vec!["x@y.com".to_string()]));
        assert_eq!(parse_invites(""), None);
        assert_eq!(parse_invites("  ,  "), None);
    }
}
