use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::info;

use token_gate::auth::store::TokenStore;
use token_gate::config::loader;
use token_gate::server;
use token_gate::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;
use token_gate::utils::logging;
use token_gate::utils::logging::LogLevel;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "token-gate.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config, init logging
    // -------------------------------

    let args = Args::parse();
    let service_config = loader::load_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Create request client
    // -------------------------------

    let timeout_ms = service_config
        .settings
        .http_timeout_ms
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS);
    let client = Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;

    // -------------------------------
    // 3. Load both token classes and start their refresh watchers
    // -------------------------------

    let (store, watchers) = TokenStore::start(&service_config.auth, &client).await?;
    info!(
        "token store ready, serving {} token values",
        store.all_token_values().await.len()
    );

    // -------------------------------
    // 4. Serve admin/diagnostics endpoints until shutdown
    // -------------------------------

    server::server::start(&service_config.settings, store).await?;

    // -------------------------------
    // 5. Stop refresh loops deterministically
    // -------------------------------

    for watcher in watchers {
        watcher.stop().await;
    }

    Ok(())
}
