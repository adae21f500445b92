//! `/api/roles` endpoints, scoped by organization.

use deck_core::{Permission, Role};
use serde::Serialize;

use crate::Gateway;
use crate::decode::decode;
use crate::error::GatewayError;

/// Payload for creating a role (everything but the server-assigned id).
#[derive(Debug, Clone, Serialize)]
pub struct NewRole {
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

impl Gateway {
    /// List all roles in an organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn list_roles(&self, organization_id: &str) -> Result<Vec<Role>, GatewayError> {
        let path = format!(
            "/api/roles?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Fetch a single role by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the id does not exist in this
    /// organization's scope.
    pub async fn get_role(&self, organization_id: &str, id: &str) -> Result<Role, GatewayError> {
        let path = format!(
            "/api/roles/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for rejected payloads.
    pub async fn create_role(
        &self,
        organization_id: &str,
        role: &NewRole,
    ) -> Result<Role, GatewayError> {
        let path = format!(
            "/api/roles?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self.post(&path).await.json(role).send().await?;
        decode(resp).await
    }

    /// Replace a role's name, description, and permission grants.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`] if the identity may not edit roles.
    pub async fn update_role(
        &self,
        organization_id: &str,
        role: &Role,
    ) -> Result<Role, GatewayError> {
        let path = format!(
            "/api/roles/{}?organizationId={}",
            urlencoding::encode(&role.id),
            urlencoding::encode(organization_id)
        );
        let resp = self.put(&path).await.json(role).send().await?;
        decode(resp).await
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn delete_role(&self, organization_id: &str, id: &str) -> Result<(), GatewayError> {
        let path = format!(
            "/api/roles/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.delete(&path).await.send().await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }
}
