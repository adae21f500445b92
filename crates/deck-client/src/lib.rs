//! # deck-client
//!
//! The session layer of taskdeck: one [`Session`] owns the backend
//! gateway, the per-organization caches, and the cached identity, and
//! exposes typed handles over the three entity families.
//!
//! - [`Session`]: auth flows (login, register, invites, organization
//!   switching), identity resolution, and permission checks.
//! - [`Session::tasks`] / [`Session::users`] / [`Session::roles`]:
//!   cached reads and write-then-invalidate mutations, all scoped to the
//!   active organization.
//!
//! Reads that hit the cache return `Arc`-shared values; writes go to the
//! backend first and only then invalidate, so a failed write leaves every
//! cached view intact.

mod error;
mod roles;
mod session;
mod tasks;
mod users;

pub use error::ClientError;
pub use roles::RolesHandle;
pub use session::Session;
pub use tasks::TasksHandle;
pub use users::UsersHandle;

pub use deck_cache::Decision;
pub use deck_gateway::GatewayError;
