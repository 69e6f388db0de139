use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::auth::token::{TokenKind, TokenMapping};
use crate::auth::watcher::{watch, Watcher};
use crate::config::settings::AuthConfig;
use crate::observability::metrics::get_metrics;
use crate::sources::resolve_source;

#[derive(Debug, Default)]
struct MappingSlot {
    tokens: TokenMapping,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Concurrent allow-list store. The two token classes are held in separate
/// slots, each guarded by its own lock so their refresh cycles never contend.
/// A lock is held only for the map swap or the lookup itself, never across
/// I/O, so a reader always observes one complete mapping.
#[derive(Debug, Default)]
pub struct TokenStore {
    c2s: RwLock<MappingSlot>,
    s2s: RwLock<MappingSlot>,
}

impl TokenStore {
    /// Resolve both configured sources, run their initial loads, and spawn a
    /// refresh watcher per dynamic source.
    ///
    /// Fails when the reload interval is missing/zero or when either initial
    /// load fails: starting with an unknown allow-list would silently lock
    /// out or admit everyone. When both sources come up empty a fallback
    /// token is generated so the very first boot is not locked out; its value
    /// is logged for the operator.
    pub async fn start(cfg: &AuthConfig, client: &Client) -> Result<(Arc<TokenStore>, Vec<Watcher>)> {
        if cfg.auth_reload_sec == 0 {
            bail!("auth_reload_sec can't be empty");
        }
        let every = Duration::from_secs(cfg.auth_reload_sec);

        let store = Arc::new(TokenStore::default());

        let c2s_source = resolve_source(&cfg.c2s_auth_source, client);
        let (mut c2s_initial, c2s_watcher) = {
            let store = store.clone();
            watch(
                TokenKind::C2s,
                c2s_source,
                move |mapping| {
                    let store = store.clone();
                    async move { store.replace(TokenKind::C2s, mapping).await }
                },
                every,
            )
            .await?
        };

        let s2s_source = resolve_source(&cfg.s2s_auth_source, client);
        let (mut s2s_initial, s2s_watcher) = {
            let store = store.clone();
            watch(
                TokenKind::S2s,
                s2s_source,
                move |mapping| {
                    let store = store.clone();
                    async move { store.replace(TokenKind::S2s, mapping).await }
                },
                every,
            )
            .await?
        };

        if c2s_initial.is_empty() && s2s_initial.is_empty() && cfg.generate_fallback_token {
            let generated = Uuid::new_v4().to_string();
            info!("no auth tokens configured, generated fallback token: {}", generated);
            c2s_initial.insert(generated.clone(), Vec::new());
            s2s_initial.insert(generated, Vec::new());
        }

        store.replace(TokenKind::C2s, c2s_initial).await;
        store.replace(TokenKind::S2s, s2s_initial).await;

        let mut watchers = Vec::new();
        watchers.extend(c2s_watcher);
        watchers.extend(s2s_watcher);

        Ok((store, watchers))
    }

    fn slot(&self, kind: TokenKind) -> &RwLock<MappingSlot> {
        match kind {
            TokenKind::C2s => &self.c2s,
            TokenKind::S2s => &self.s2s,
        }
    }

    /// Permitted origins for `token`, or `None` when the token is unknown for
    /// this kind. An empty list means the token carries no origin restriction.
    pub async fn origins(&self, kind: TokenKind, token: &str) -> Option<Vec<String>> {
        self.slot(kind).read().await.tokens.get(token).cloned()
    }

    pub async fn lookup_c2s(&self, token: &str) -> Option<Vec<String>> {
        self.origins(TokenKind::C2s, token).await
    }

    pub async fn lookup_s2s(&self, token: &str) -> Option<Vec<String>> {
        self.origins(TokenKind::S2s, token).await
    }

    /// Union of both classes' token values, deduplicated.
    pub async fn all_token_values(&self) -> HashSet<String> {
        let mut values: HashSet<String> = self.c2s.read().await.tokens.keys().cloned().collect();
        values.extend(self.s2s.read().await.tokens.keys().cloned());
        values
    }

    pub async fn token_count(&self, kind: TokenKind) -> usize {
        self.slot(kind).read().await.tokens.len()
    }

    pub async fn last_refresh(&self, kind: TokenKind) -> Option<DateTime<Utc>> {
        self.slot(kind).read().await.refreshed_at
    }

    /// Install a freshly built mapping, replacing the previous one whole.
    pub async fn replace(&self, kind: TokenKind, mapping: TokenMapping) {
        let count = mapping.len();
        {
            let mut slot = self.slot(kind).write().await;
            slot.tokens = mapping;
            slot.refreshed_at = Some(Utc::now());
        }
        get_metrics()
            .await
            .cached_tokens
            .with_label_values(&[kind.as_str()])
            .set(count as i64);
    }
}
