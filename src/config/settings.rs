use serde::Deserialize;

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub auth: AuthConfig,
}

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub http_timeout_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_path")]
    pub path: String,
    #[serde(default)]
    pub is_enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            path: default_metrics_path(),
            is_enabled: false,
        }
    }
}

/// ================================
/// Auth token sources
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Refresh interval for dynamic token sources. Required; zero rejects
    /// startup.
    #[serde(default)]
    pub auth_reload_sec: u64,
    #[serde(default)]
    pub c2s_auth_source: AuthSource,
    #[serde(default)]
    pub s2s_auth_source: AuthSource,
    /// Install a generated token when both sources come up empty, so a fresh
    /// deployment is reachable. The value is logged, which discloses it to
    /// anyone with log access; disable where that matters.
    #[serde(default = "default_true")]
    pub generate_fallback_token: bool,
}

/// A token source is either a single string (URL, `file://` path, inline JSON
/// array, or delimited token list) or a YAML list of literal token values.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum AuthSource {
    Values(Vec<String>),
    Value(String),
}

impl Default for AuthSource {
    fn default() -> Self {
        AuthSource::Value(String::new())
    }
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_true() -> bool {
    true
}
