#[cfg(test)]
mod test {

    use std::time::Duration;

    use reqwest::Client;

    use crate::auth::store::TokenStore;
    use crate::config::settings::{AuthConfig, AuthSource};

    fn auth_config(c2s_path: String) -> AuthConfig {
        AuthConfig {
            auth_reload_sec: 1,
            c2s_auth_source: AuthSource::Value(c2s_path),
            s2s_auth_source: AuthSource::Value(String::new()),
            generate_fallback_token: false,
        }
    }

    #[tokio::test]
    async fn rewritten_file_is_picked_up_on_next_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"[{"token": "f1", "origins": ["a.com"]}]"#).unwrap();

        let cfg = auth_config(format!("file://{}", path.display()));
        let (store, watchers) = TokenStore::start(&cfg, &Client::new()).await.unwrap();

        assert_eq!(store.lookup_c2s("f1").await, Some(vec!["a.com".to_string()]));

        std::fs::write(&path, r#"["f2"]"#).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(store.lookup_c2s("f1").await, None);
        assert_eq!(store.lookup_c2s("f2").await, Some(Vec::new()));

        for watcher in watchers {
            watcher.stop().await;
        }
    }

    #[tokio::test]
    async fn deleted_file_keeps_previous_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, r#"["f1"]"#).unwrap();

        let cfg = auth_config(format!("file://{}", path.display()));
        let (store, watchers) = TokenStore::start(&cfg, &Client::new()).await.unwrap();

        std::fs::remove_file(&path).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        assert_eq!(store.lookup_c2s("f1").await, Some(Vec::new()));

        for watcher in watchers {
            watcher.stop().await;
        }
    }

    #[tokio::test]
    async fn missing_file_aborts_startup() {
        let cfg = auth_config("file:///nonexistent/tokens.json".to_string());

        let err = TokenStore::start(&cfg, &Client::new()).await.err().unwrap();

        assert!(err.to_string().contains("c2s"));
    }
}
