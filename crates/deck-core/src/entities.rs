//! Entity structs for the organization-scoped domain objects.
//!
//! Every entity is uniquely identified by `(organization_id, id)`; the
//! organization id travels out-of-band (query parameter, cache key) rather
//! than as a field on each struct, matching the backend's wire shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{TaskPriority, TaskStatus};

/// Access to an entity's id, so caches can seed single-item entries from
/// an already-fetched list.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// A work item within one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assignee_id: Option<String>,
    pub created_by_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<TaskComment>,
}

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskComment {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A member of an organization, with the roles granted there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<RoleRef>,
}

/// A role reference as embedded in a [`User`] (name only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub name: String,
}

/// A named permission set within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

/// One `{action, resource}` grant inside a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub resource: String,
    pub action: String,
}

/// An organization (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Task {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Role {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TASK_FIXTURE: &str = r#"{
        "id": "t1",
        "title": "Ship the release",
        "description": "Cut and tag v1.2",
        "status": "IN_PROGRESS",
        "priority": "HIGH",
        "assigneeId": "u2",
        "createdById": "u1",
        "createdAt": "2025-03-01T09:00:00Z",
        "dueDate": null,
        "comments": [{
            "id": "c1",
            "taskId": "t1",
            "userId": "u2",
            "content": "on it",
            "createdAt": "2025-03-01T10:00:00Z"
        }]
    }"#;

    #[test]
    fn task_deserializes_from_wire_shape() {
        let task: Task = serde_json::from_str(TASK_FIXTURE).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.assignee_id.as_deref(), Some("u2"));
        assert!(task.due_date.is_none());
        assert_eq!(task.comments.len(), 1);
        assert_eq!(task.comments[0].task_id, "t1");
        assert_eq!(task.key(), "t1");
    }

    #[test]
    fn task_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "t2",
            "title": "Triage",
            "description": "",
            "status": "PENDING",
            "priority": "LOW",
            "assigneeId": null,
            "createdById": "u1",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.comments.is_empty());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn user_and_role_deserialize() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","email":"a@b.com","roles":[{"name":"viewer"}]}"#)
                .unwrap();
        assert_eq!(user.roles[0].name, "viewer");

        let role: Role = serde_json::from_str(
            r#"{
                "id": "r1",
                "name": "editor",
                "description": "can edit tasks",
                "permissions": [{"resource": "tasks", "action": "update"}]
            }"#,
        )
        .unwrap();
        assert_eq!(role.permissions[0].action, "update");
        assert_eq!(role.key(), "r1");
    }
}
