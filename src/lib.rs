//! # Token Gate Library
//!
//! Admission control for an event-ingestion service. Token allow-lists are
//! resolved from HTTP, file, inline, or config-list sources and kept fresh on
//! a fixed interval; a concurrent store serves lookups while whole mappings
//! are swapped in behind it.
//!
//! Modules:
//! - `config` — service configuration and source declarations
//! - `auth` — token parsing, the concurrent store, and the refresh watcher
//! - `sources` — HTTP, file, inline, and config-list allow-list sources
//! - `server` — admin/diagnostics HTTP surface

pub mod auth;
pub mod config;
pub mod observability;
pub mod server;
pub mod sources;
pub mod tests;
pub mod utils;

pub use crate::auth::parser::{parse_bytes, parse_list};
pub use crate::auth::store::TokenStore;
pub use crate::config::settings::ServiceConfig;
