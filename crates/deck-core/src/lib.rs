//! # deck-core
//!
//! Core types shared across all taskdeck crates:
//! - Entity structs for the organization-scoped domain objects (tasks,
//!   users, roles, organizations)
//! - The authenticated identity and its organization memberships
//! - Status/priority enums with their wire representations
//! - The uniform response envelope every backend endpoint speaks
//! - The entity-kind enum used in URLs and cache keys

pub mod entities;
pub mod envelope;
pub mod enums;
pub mod identity;
pub mod kind;

pub use entities::{Keyed, Organization, Permission, Role, RoleRef, Task, TaskComment, User};
pub use envelope::Envelope;
pub use enums::{TaskPriority, TaskStatus};
pub use identity::{Identity, Membership};
pub use kind::EntityKind;
