//! Cached member access and member writes, scoped to the active
//! organization.

use std::sync::Arc;

use deck_cache::mutation;
use deck_core::User;
use deck_gateway::users::UserUpdate;

use crate::error::ClientError;
use crate::session::Session;

pub struct UsersHandle<'a> {
    session: &'a Session,
}

impl Session {
    #[must_use]
    pub fn users(&self) -> UsersHandle<'_> {
        UsersHandle { session: self }
    }
}

impl UsersHandle<'_> {
    /// All members of the active organization, cached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoOrganization`] without an active scope, or
    /// the wrapped gateway error of the shared fetch.
    pub async fn all(&self) -> Result<Arc<Vec<User>>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .users
            .get_list(&org, || {
                let org = org.clone();
                async move { gateway.list_users(&org).await }
            })
            .await?;
        Ok(result)
    }

    /// One member by id, cached.
    ///
    /// # Errors
    ///
    /// `NotFound` surfaces through the wrapper for missing ids.
    pub async fn by_id(&self, id: &str) -> Result<Arc<User>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .users
            .get_item(&org, id, || {
                let org = org.clone();
                let id = id.to_string();
                async move { gateway.get_user(&org, &id).await }
            })
            .await?;
        Ok(result)
    }

    /// Apply a partial update to a member. A role change alters what the
    /// member may do, so the organization's permission decisions are
    /// invalidated alongside the user entries.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn update(&self, id: &str, update: &UserUpdate) -> Result<User, ClientError> {
        let org = self.session.require_org().await?;
        let updated = mutation::update(
            &self.session.caches.users,
            &org,
            id,
            self.session.gateway.update_user(&org, id, update),
        )
        .await?;
        if update.roles.is_some() {
            self.session.caches.permissions.invalidate_org(&org).await;
        }
        Ok(updated)
    }

    /// Remove a member from the organization.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let org = self.session.require_org().await?;
        mutation::delete(
            &self.session.caches.users,
            &org,
            id,
            self.session.gateway.delete_user(&org, id),
        )
        .await?;
        Ok(())
    }
}
