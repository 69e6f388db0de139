use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing::info;

use crate::auth::store::TokenStore;
use crate::config::settings::SettingsConfig;
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::server::routes;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TokenStore>,
    pub metrics_state: MetricsState,
}

/// Start the admin/diagnostics server. Serves until a ctrl-c / SIGTERM-style
/// shutdown signal arrives.
pub async fn start(settings_config: &SettingsConfig, store: Arc<TokenStore>) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState {
        store,
        metrics_state: MetricsState::new(metrics.registry.clone()),
    };

    let app = Router::new()
        .merge(routes::router())
        .merge(state.metrics_state.router(&settings_config.metrics))
        .with_state(state);

    let bind_addr = &settings_config.server.host;
    let port = &settings_config.server.port;
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", bind_addr, port)).await?;
    info!("admin server listening on {}:{}", bind_addr, port);

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    metrics.up.set(0);

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
