use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::error;

use crate::config::settings::{LogFormat, LoggingConfig, ServiceConfig};

/// Load and validate config from a YAML file.
pub async fn load_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading config {} failed", path.display()))?;

    let expanded = expand_env_vars(&content);
    parse_config(&expanded)
}

pub fn parse_config(content: &str) -> Result<ServiceConfig> {
    let mut service_config: ServiceConfig = serde_yaml::from_str(content)
        .inspect_err(|e| error!("parse config error: {}", e))
        .context("invalid config format")?;

    // Apply defaults
    if service_config.settings.logging.is_none() {
        service_config.settings.logging = Some(LoggingConfig {
            level: "info".to_owned(),
            format: LogFormat::Compact,
        });
    }

    Ok(service_config)
}

/// Expand `${VAR}` / `${VAR:default}` placeholders from the environment.
fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
