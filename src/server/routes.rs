use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::json;

use crate::auth::token::TokenKind;
use crate::server::server::AppState;

/// Administrative read surface: token enumeration and origin resolution.
/// These routes expose token values, so the listener should stay on an
/// internal interface.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/tokens", get(list_tokens))
        .route("/api/v1/tokens/{kind}/{token}", get(token_origins))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let store = &state.store;
    Json(json!({
        "status": "ok",
        "c2s": {
            "tokens": store.token_count(TokenKind::C2s).await,
            "refreshed_at": store.last_refresh(TokenKind::C2s).await.map(|t| t.to_rfc3339()),
        },
        "s2s": {
            "tokens": store.token_count(TokenKind::S2s).await,
            "refreshed_at": store.last_refresh(TokenKind::S2s).await.map(|t| t.to_rfc3339()),
        },
    }))
}

async fn list_tokens(State(state): State<AppState>) -> impl IntoResponse {
    let mut tokens: Vec<String> = state.store.all_token_values().await.into_iter().collect();
    tokens.sort();
    Json(json!({ "tokens": tokens }))
}

async fn token_origins(
    State(state): State<AppState>,
    Path((kind, token)): Path<(String, String)>,
) -> Response {
    let kind = match kind.parse::<TokenKind>() {
        Ok(kind) => kind,
        Err(_) => return (StatusCode::BAD_REQUEST, "unknown token kind").into_response(),
    };

    match state.store.origins(kind, &token).await {
        Some(origins) => Json(json!({ "token": token, "origins": origins })).into_response(),
        None => (StatusCode::NOT_FOUND, "token not found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Client;
    use serde_json::Value;

    use super::*;
    use crate::auth::store::TokenStore;
    use crate::config::settings::{AuthConfig, AuthSource};
    use crate::observability::metrics::get_metrics;
    use crate::observability::routes::MetricsState;
    use crate::tests::common::{build_reqwest_client, spawn_axum};

    async fn spawn_admin(store: Arc<TokenStore>) -> (tokio::task::JoinHandle<()>, String) {
        let metrics = get_metrics().await;
        let state = AppState {
            store,
            metrics_state: MetricsState::new(metrics.registry.clone()),
        };
        let app = router().with_state(state);
        let (handle, addr) = spawn_axum(app).await;
        (handle, format!("http://{}", addr))
    }

    async fn demo_store() -> Arc<TokenStore> {
        let cfg = AuthConfig {
            auth_reload_sec: 60,
            c2s_auth_source: AuthSource::Value(
                r#"[{"token":"tok1","origins":["a.com"]}]"#.to_string(),
            ),
            s2s_auth_source: AuthSource::Values(vec!["tok2".to_string()]),
            generate_fallback_token: true,
        };
        let (store, _watchers) = TokenStore::start(&cfg, &Client::new()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn health_reports_per_kind_counts() {
        let (handle, base) = spawn_admin(demo_store().await).await;
        let client = build_reqwest_client();

        let body: Value = client
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["status"], "ok");
        assert_eq!(body["c2s"]["tokens"], 1);
        assert_eq!(body["s2s"]["tokens"], 1);
        assert!(body["c2s"]["refreshed_at"].is_string());

        handle.abort();
    }

    #[tokio::test]
    async fn token_list_returns_union() {
        let (handle, base) = spawn_admin(demo_store().await).await;
        let client = build_reqwest_client();

        let body: Value = client
            .get(format!("{}/api/v1/tokens", base))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        let tokens = body["tokens"].as_array().unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens.contains(&Value::String("tok1".to_string())));
        assert!(tokens.contains(&Value::String("tok2".to_string())));

        handle.abort();
    }

    #[tokio::test]
    async fn origins_endpoint_resolves_and_404s() {
        let (handle, base) = spawn_admin(demo_store().await).await;
        let client = build_reqwest_client();

        let found = client
            .get(format!("{}/api/v1/tokens/c2s/tok1", base))
            .send()
            .await
            .unwrap();
        assert_eq!(found.status(), StatusCode::OK);
        let body: Value = found.json().await.unwrap();
        assert_eq!(body["origins"], serde_json::json!(["a.com"]));

        let missing = client
            .get(format!("{}/api/v1/tokens/s2s/tok1", base))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let bad_kind = client
            .get(format!("{}/api/v1/tokens/p2p/tok1", base))
            .send()
            .await
            .unwrap();
        assert_eq!(bad_kind.status(), StatusCode::BAD_REQUEST);

        handle.abort();
    }
}
