//! Entity-kind identifier shared by URLs and cache keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three organization-scoped entity collections the backend exposes.
///
/// `as_str()` doubles as the URL path segment (`/api/tasks`) and the
/// kind component of scoped cache keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Tasks,
    Users,
    Roles,
}

impl EntityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Users => "users",
            Self::Roles => "roles",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
