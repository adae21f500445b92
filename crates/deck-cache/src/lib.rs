//! # deck-cache
//!
//! Organization-scoped query caching for taskdeck.
//!
//! Three pieces, all free of I/O (fetches are caller-supplied futures):
//! - [`ScopedCache`]: keyed async cache with in-flight de-duplication —
//!   concurrent reads of the same `(org, id)` key share one fetch and
//!   observe the identical value. Entries never expire by wall clock
//!   unless a TTL is configured; explicit invalidation is the freshness
//!   mechanism.
//! - [`mutation`]: write-then-invalidate helpers. No optimistic patching;
//!   the entries a write could have changed are marked stale and the next
//!   read re-fetches.
//! - [`PermissionGate`]: cached tri-state ([`Decision`]) answers to "may
//!   the current identity do {actions} on {resources} here?", keyed by
//!   sorted question sets and organization.
//!
//! Cross-organization isolation is structural: every key carries the
//! organization id, so entries for two tenants can never alias even when
//! entity ids collide.

mod cache;
mod error;
pub mod mutation;
mod permission;
mod registry;
mod state;

pub use cache::ScopedCache;
pub use error::CacheError;
pub use permission::{Decision, PermissionGate};
pub use registry::CacheRegistry;
pub use state::EntryStatus;
