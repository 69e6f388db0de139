use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::auth::token::{TokenKind, TokenMapping};
use crate::observability::metrics::get_metrics;
use crate::sources::SourceKind;

/// Lifecycle handle for a background refresh loop. Dropping it without
/// calling [`Watcher::stop`] leaves the loop running for the rest of the
/// process.
pub struct Watcher {
    kind: TokenKind,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Watcher {
    /// Signal the refresh loop and wait for it to exit.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
        debug!("{} token watcher stopped", self.kind);
    }
}

/// Load `source` once, then keep it fresh.
///
/// The first load runs on the caller and its failure aborts the whole
/// operation: no background task is started. On success the initial mapping
/// is returned and, for dynamic sources, a loop is spawned that re-loads
/// every `every` and pushes each successful mapping through `update`. A
/// failed tick is logged and the previously installed mapping stays
/// authoritative until the next one.
///
/// Static sources (inline array, config list) cannot change without a
/// restart, so they get no loop and `None` is returned for the handle.
pub async fn watch<F, Fut>(
    kind: TokenKind,
    source: SourceKind,
    update: F,
    every: Duration,
) -> Result<(TokenMapping, Option<Watcher>)>
where
    F: Fn(TokenMapping) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let initial = source
        .load()
        .await
        .with_context(|| format!("initial {} token load failed", kind))?;

    if !source.is_dynamic() {
        return Ok((initial, None));
    }

    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    debug!("{} refresh loop shutting down", kind);
                    break;
                }
                _ = tokio::time::sleep(every) => {
                    refresh_once(kind, &source, &update).await;
                }
            }
        }
    });

    Ok((
        initial,
        Some(Watcher {
            kind,
            shutdown,
            task,
        }),
    ))
}

async fn refresh_once<F, Fut>(kind: TokenKind, source: &SourceKind, update: &F)
where
    F: Fn(TokenMapping) -> Fut,
    Fut: Future<Output = ()>,
{
    let metrics = get_metrics().await;
    let start = Instant::now();
    metrics
        .reload_attempts
        .with_label_values(&[kind.as_str()])
        .inc();

    match source.load().await {
        Ok(mapping) => {
            metrics
                .reload_duration
                .with_label_values(&[kind.as_str()])
                .observe(start.elapsed().as_secs_f64());
            debug!("{} tokens reloaded, {} entries", kind, mapping.len());
            update(mapping).await;
        }
        Err(e) => {
            metrics
                .reload_duration
                .with_label_values(&[kind.as_str()])
                .observe(start.elapsed().as_secs_f64());
            metrics
                .reload_failures
                .with_label_values(&[kind.as_str()])
                .inc();
            warn!("{} token reload failed, keeping previous tokens: {:#}", kind, e);
        }
    }
}
