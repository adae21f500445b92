//! Cached role access and role writes, scoped to the active organization.
//!
//! Every role write also drops the organization's permission decisions:
//! a changed grant set can flip what the current identity may do, and a
//! stale `Allowed` is worse than a re-check.

use std::sync::Arc;

use deck_cache::mutation;
use deck_core::Role;
use deck_gateway::roles::NewRole;

use crate::error::ClientError;
use crate::session::Session;

pub struct RolesHandle<'a> {
    session: &'a Session,
}

impl Session {
    #[must_use]
    pub fn roles(&self) -> RolesHandle<'_> {
        RolesHandle { session: self }
    }
}

impl RolesHandle<'_> {
    /// All roles in the active organization, cached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoOrganization`] without an active scope, or
    /// the wrapped gateway error of the shared fetch.
    pub async fn all(&self) -> Result<Arc<Vec<Role>>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .roles
            .get_list(&org, || {
                let org = org.clone();
                async move { gateway.list_roles(&org).await }
            })
            .await?;
        Ok(result)
    }

    /// One role by id, cached.
    ///
    /// # Errors
    ///
    /// `NotFound` surfaces through the wrapper for missing ids.
    pub async fn by_id(&self, id: &str) -> Result<Arc<Role>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .roles
            .get_item(&org, id, || {
                let org = org.clone();
                let id = id.to_string();
                async move { gateway.get_role(&org, &id).await }
            })
            .await?;
        Ok(result)
    }

    /// Create a role.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn create(&self, role: &NewRole) -> Result<Role, ClientError> {
        let org = self.session.require_org().await?;
        let created = mutation::create(
            &self.session.caches.roles,
            &org,
            self.session.gateway.create_role(&org, role),
        )
        .await?;
        self.session.caches.permissions.invalidate_org(&org).await;
        Ok(created)
    }

    /// Replace a role's name, description, and grants.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn update(&self, role: &Role) -> Result<Role, ClientError> {
        let org = self.session.require_org().await?;
        let updated = mutation::update(
            &self.session.caches.roles,
            &org,
            &role.id,
            self.session.gateway.update_role(&org, role),
        )
        .await?;
        self.session.caches.permissions.invalidate_org(&org).await;
        Ok(updated)
    }

    /// Delete a role.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let org = self.session.require_org().await?;
        mutation::delete(
            &self.session.caches.roles,
            &org,
            id,
            self.session.gateway.delete_role(&org, id),
        )
        .await?;
        self.session.caches.permissions.invalidate_org(&org).await;
        Ok(())
    }
}
