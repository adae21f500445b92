//! `/api/tasks` endpoints, scoped by organization.

use deck_core::{Task, TaskComment, TaskPriority, TaskStatus};
use serde::Serialize;

use crate::Gateway;
use crate::decode::decode;
use crate::error::GatewayError;

/// Payload for creating a task (everything but the server-assigned id).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<String>,
    pub created_by_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
}

/// Payload for adding a comment to a task.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub user_id: String,
    pub content: String,
}

impl Gateway {
    /// List all tasks in an organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn list_tasks(&self, organization_id: &str) -> Result<Vec<Task>, GatewayError> {
        let path = format!(
            "/api/tasks?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// List the tasks assigned to one user within an organization.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn list_tasks_by_assignee(
        &self,
        organization_id: &str,
        assignee_id: &str,
    ) -> Result<Vec<Task>, GatewayError> {
        let path = format!(
            "/api/tasks?organizationId={}&assigneeId={}",
            urlencoding::encode(organization_id),
            urlencoding::encode(assignee_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Fetch a single task by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the id does not exist in this
    /// organization's scope.
    pub async fn get_task(&self, organization_id: &str, id: &str) -> Result<Task, GatewayError> {
        let path = format!(
            "/api/tasks/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] for rejected payloads.
    pub async fn create_task(
        &self,
        organization_id: &str,
        task: &NewTask,
    ) -> Result<Task, GatewayError> {
        let path = format!(
            "/api/tasks?organizationId={}",
            urlencoding::encode(organization_id)
        );
        let resp = self.post(&path).await.json(task).send().await?;
        decode(resp).await
    }

    /// Replace a task (full PUT; the backend recomputes derived fields).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if the task vanished, or
    /// [`GatewayError::Auth`] if the identity may not update it.
    pub async fn update_task(
        &self,
        organization_id: &str,
        task: &Task,
    ) -> Result<Task, GatewayError> {
        let path = format!(
            "/api/tasks/{}?organizationId={}",
            urlencoding::encode(&task.id),
            urlencoding::encode(organization_id)
        );
        let resp = self.put(&path).await.json(task).send().await?;
        decode(resp).await
    }

    /// Delete a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn delete_task(&self, organization_id: &str, id: &str) -> Result<(), GatewayError> {
        let path = format!(
            "/api/tasks/{}?organizationId={}",
            urlencoding::encode(id),
            urlencoding::encode(organization_id)
        );
        let resp = self.delete(&path).await.send().await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }

    /// Add a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn add_comment(
        &self,
        organization_id: &str,
        task_id: &str,
        comment: &NewComment,
    ) -> Result<TaskComment, GatewayError> {
        let path = format!(
            "/api/tasks/{}/comments?organizationId={}",
            urlencoding::encode(task_id),
            urlencoding::encode(organization_id)
        );
        let resp = self.post(&path).await.json(comment).send().await?;
        decode(resp).await
    }

    /// Fetch a single comment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::NotFound`] if either id does not resolve.
    pub async fn get_comment(
        &self,
        organization_id: &str,
        task_id: &str,
        comment_id: &str,
    ) -> Result<TaskComment, GatewayError> {
        let path = format!(
            "/api/tasks/{}/comments/{}?organizationId={}",
            urlencoding::encode(task_id),
            urlencoding::encode(comment_id),
            urlencoding::encode(organization_id)
        );
        let resp = self.get(&path).await.send().await?;
        decode(resp).await
    }

    /// Delete a comment.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport, parse, or envelope failure.
    pub async fn delete_comment(
        &self,
        organization_id: &str,
        task_id: &str,
        comment_id: &str,
    ) -> Result<(), GatewayError> {
        let path = format!(
            "/api/tasks/{}/comments/{}?organizationId={}",
            urlencoding::encode(task_id),
            urlencoding::encode(comment_id),
            urlencoding::encode(organization_id)
        );
        let resp = self.delete(&path).await.send().await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }
}
