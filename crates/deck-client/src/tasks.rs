//! Cached task access and task writes, scoped to the active organization.

use std::sync::Arc;

use deck_cache::mutation;
use deck_core::{Task, TaskComment};
use deck_gateway::tasks::{NewComment, NewTask};

use crate::error::ClientError;
use crate::session::Session;

pub struct TasksHandle<'a> {
    session: &'a Session,
}

impl Session {
    #[must_use]
    pub fn tasks(&self) -> TasksHandle<'_> {
        TasksHandle { session: self }
    }
}

impl TasksHandle<'_> {
    /// All tasks in the active organization, cached.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NoOrganization`] without an active scope, or
    /// the wrapped gateway error of the shared fetch.
    pub async fn all(&self) -> Result<Arc<Vec<Task>>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .tasks
            .get_list(&org, || {
                let org = org.clone();
                async move { gateway.list_tasks(&org).await }
            })
            .await?;
        Ok(result)
    }

    /// One task by id, cached (and servable from a fresh list without an
    /// extra fetch).
    ///
    /// # Errors
    ///
    /// `NotFound` surfaces through the wrapper for missing ids.
    pub async fn by_id(&self, id: &str) -> Result<Arc<Task>, ClientError> {
        let org = self.session.require_org().await?;
        let gateway = Arc::clone(&self.session.gateway);
        let result = self
            .session
            .caches
            .tasks
            .get_item(&org, id, || {
                let org = org.clone();
                let id = id.to_string();
                async move { gateway.get_task(&org, &id).await }
            })
            .await?;
        Ok(result)
    }

    /// Tasks assigned to one user. Not cached: the assignee filter is a
    /// per-view query, fetched on demand.
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub async fn by_assignee(&self, assignee_id: &str) -> Result<Vec<Task>, ClientError> {
        let org = self.session.require_org().await?;
        Ok(self
            .session
            .gateway
            .list_tasks_by_assignee(&org, assignee_id)
            .await?)
    }

    /// Create a task; on success the list entry is invalidated and the
    /// next read re-fetches (no optimistic insert).
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing; the gateway error passes
    /// through for the caller to branch on.
    pub async fn create(&self, task: &NewTask) -> Result<Task, ClientError> {
        let org = self.session.require_org().await?;
        let created = mutation::create(
            &self.session.caches.tasks,
            &org,
            self.session.gateway.create_task(&org, task),
        )
        .await?;
        Ok(created)
    }

    /// Update a task; invalidates the list entry and the task's own entry.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn update(&self, task: &Task) -> Result<Task, ClientError> {
        let org = self.session.require_org().await?;
        let updated = mutation::update(
            &self.session.caches.tasks,
            &org,
            &task.id,
            self.session.gateway.update_task(&org, task),
        )
        .await?;
        Ok(updated)
    }

    /// Delete a task; invalidation matches [`TasksHandle::update`].
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let org = self.session.require_org().await?;
        mutation::delete(
            &self.session.caches.tasks,
            &org,
            id,
            self.session.gateway.delete_task(&org, id),
        )
        .await?;
        Ok(())
    }

    /// Add a comment. Comments live inside the task payload, so the
    /// task's entries are invalidated like any other task write.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn add_comment(
        &self,
        task_id: &str,
        comment: &NewComment,
    ) -> Result<TaskComment, ClientError> {
        let org = self.session.require_org().await?;
        let created = mutation::update(
            &self.session.caches.tasks,
            &org,
            task_id,
            self.session.gateway.add_comment(&org, task_id, comment),
        )
        .await?;
        Ok(created)
    }

    /// One comment by id. Uncached (comment detail views are rare).
    ///
    /// # Errors
    ///
    /// Returns the gateway error unchanged.
    pub async fn comment(
        &self,
        task_id: &str,
        comment_id: &str,
    ) -> Result<TaskComment, ClientError> {
        let org = self.session.require_org().await?;
        Ok(self
            .session
            .gateway
            .get_comment(&org, task_id, comment_id)
            .await?)
    }

    /// Delete a comment; invalidates the task's entries.
    ///
    /// # Errors
    ///
    /// A failed write invalidates nothing.
    pub async fn delete_comment(&self, task_id: &str, comment_id: &str) -> Result<(), ClientError> {
        let org = self.session.require_org().await?;
        mutation::update(
            &self.session.caches.tasks,
            &org,
            task_id,
            self.session.gateway.delete_comment(&org, task_id, comment_id),
        )
        .await?;
        Ok(())
    }
}
