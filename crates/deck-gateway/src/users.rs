//! `/api/users` endpoints, scoped by organization.

use deck_core::{RoleRef, User};
use serde::Serialize;

use crate::Gateway;
use crate::decode::decode;
use crate::error::GatewayError;

/// Partial update for a user; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<RoleRef>>,
}

impl Gateway {
    /// List all users in an organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn list_users(&self, organization_id: &str) -> Result<Vec<User>, GatewayError> {
        let path = format!(
            "/api/users?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Fetch a single user by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the id does not exist in this
    /// organization's scope.
    pub async fn get_user(&self, organization_id: &str, id: &str) -> Result<User, GatewayError> {
        let path = format!(
            "/api/users/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Apply a partial update to a user (role changes come through here).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the identity may not edit users.
    pub async fn update_user(
        &self,
        organization_id: &str,
        id: &str,
        update: &UserUpdate,
    ) -> Result<User, GatewayError> {
        let path = format!(
            "/api/users/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.put(&path).await.json(update).send().await?;
        decode(resp).await
    }

    /// Remove a user from the organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn delete_user(&self, organization_id: &str, id: &str) -> Result<(), GatewayError> {
        let path = format!(
            "/api/users/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.delete(&path).await.send().await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }
}
