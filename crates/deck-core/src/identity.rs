//! Authenticated identity and organization memberships.

use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by `POST /api/auth/me`.
///
/// Produced by `deck-gateway`, cached by the session layer. Contains only
/// data fields — no auth logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub memberships: Vec<Membership>,
}

/// One identity's relationship to one organization.
///
/// At most one membership carries `is_current = true`; it determines the
/// active organization scope for every cache key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub organization_id: String,
    pub organization_name: String,
    pub role_name: String,
    #[serde(default)]
    pub is_current: bool,
}

impl Identity {
    /// The active organization id: the membership marked `is_current`,
    /// falling back to the first membership if none is marked.
    #[must_use]
    pub fn current_org_id(&self) -> Option<&str> {
        self.memberships
            .iter()
            .find(|m| m.is_current)
            .or_else(|| self.memberships.first())
            .map(|m| m.organization_id.as_str())
    }

    /// The role name within the active organization, if any.
    #[must_use]
    pub fn current_role(&self) -> Option<&str> {
        self.memberships
            .iter()
            .find(|m| m.is_current)
            .or_else(|| self.memberships.first())
            .map(|m| m.role_name.as_str())
    }
}
