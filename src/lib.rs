//! # Proactive Refresh Cache
//!
//! Keeps a set of named tokens fetched from unreliable origin services
//! continuously fresh in the background, so foreground lookups are always
//! served from memory and never block on network I/O.
//!
//! Modules:
//! - `cache` — immutable entries, per-resource refreshers, and the registry
//! - `sources` — origin fetcher with infinite retry and capped backoff
//! - `resilience` — the backoff policy
//! - `server` — the HTTP front end serving `GET /item/{name}`
//! - `config` — CLI/env settings

pub mod cache;
pub mod config;
pub mod resilience;
pub mod server;
pub mod sources;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::cache::entry::Entry;
pub use crate::cache::refresher::RefreshPolicy;
pub use crate::cache::registry::CacheRegistry;
pub use crate::resilience::retry::BackoffPolicy;
pub use crate::sources::fetch::Fetcher;
