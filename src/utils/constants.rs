//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

// Source labels used in logs and parse errors
pub const SOURCE_INLINE: &str = "inline config json array";
