use std::sync::Arc;

use prometheus::{
    HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
};
use tokio::sync::OnceCell;
use tracing::info;

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Reload metrics
    pub reload_attempts: IntCounterVec,
    pub reload_failures: IntCounterVec,
    pub reload_duration: HistogramVec,

    // Store metrics
    pub cached_tokens: IntGaugeVec,

    // Runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("tokengate".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            reload_attempts: IntCounterVec::new(
                Opts::new("token_reloads_total", "Total token reload attempts by kind"),
                &["kind"],
            )
            .unwrap(),
            reload_failures: IntCounterVec::new(
                Opts::new("token_reload_failures_total", "Failed token reloads by kind"),
                &["kind"],
            )
            .unwrap(),
            reload_duration: HistogramVec::new(
                HistogramOpts::new("token_reload_duration_seconds", "Token reload duration seconds")
                    .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),
                &["kind"],
            )
            .unwrap(),

            cached_tokens: IntGaugeVec::new(
                Opts::new("cached_tokens_total", "Tokens currently held per kind"),
                &["kind"],
            )
            .unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.reload_attempts.clone())).unwrap();
        reg.register(Box::new(metrics.reload_failures.clone())).unwrap();
        reg.register(Box::new(metrics.reload_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cached_tokens.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
