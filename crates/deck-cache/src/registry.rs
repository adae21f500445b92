//! One cache per entity kind plus the permission gate, behind a single
//! clear/invalidate surface.

use deck_config::CacheConfig;
use deck_core::{EntityKind, Role, Task, User};

use crate::cache::ScopedCache;
use crate::permission::PermissionGate;
use crate::state::EntryStatus;

/// Every cache the client holds. Kind scoping is structural: each entity
/// kind gets its own typed cache, so `(kind, org, id)` can never collide
/// across kinds.
pub struct CacheRegistry<E> {
    pub tasks: ScopedCache<Task, E>,
    pub users: ScopedCache<User, E>,
    pub roles: ScopedCache<Role, E>,
    pub permissions: PermissionGate<E>,
}

impl<E> CacheRegistry<E> {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            tasks: ScopedCache::new(config),
            users: ScopedCache::new(config),
            roles: ScopedCache::new(config),
            permissions: PermissionGate::new(config),
        }
    }

    /// Drop every entry and every permission decision. This is the
    /// cold-restart policy for organization switches and logout: simpler
    /// and safer than incremental invalidation, and it cannot leak
    /// cross-organization data through a missed key.
    pub async fn clear(&self) {
        self.tasks.clear().await;
        self.users.clear().await;
        self.roles.clear().await;
        self.permissions.clear().await;
        tracing::debug!("cache registry cleared");
    }

    /// Mark everything scoped to one organization stale, permission
    /// decisions included (used after role edits).
    pub async fn invalidate_org(&self, org: &str) {
        self.tasks.invalidate_org(org).await;
        self.users.invalidate_org(org).await;
        self.roles.invalidate_org(org).await;
        self.permissions.invalidate_org(org).await;
    }

    /// List-entry status for one kind, for introspection and tests.
    pub async fn list_status(&self, kind: EntityKind, org: &str) -> Option<EntryStatus> {
        match kind {
            EntityKind::Tasks => self.tasks.list_status(org).await,
            EntityKind::Users => self.users.list_status(org).await,
            EntityKind::Roles => self.roles.list_status(org).await,
        }
    }
}
