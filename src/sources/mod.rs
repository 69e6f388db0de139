use std::future::Future;

use anyhow::Result;
use reqwest::Client;

pub mod file;
pub mod http;

use crate::auth::parser::{parse_bytes, parse_list};
use crate::auth::token::TokenMapping;
use crate::config::settings::AuthSource;
use crate::utils::constants::SOURCE_INLINE;
use file::FileSource;
use http::HttpSource;

/// A resolved allow-list source: loads the complete token mapping it backs.
pub trait LoadMapping {
    fn load(&self) -> impl Future<Output = Result<TokenMapping>> + Send;
}

#[derive(Debug, Clone)]
pub enum SourceKind {
    Http(HttpSource),
    File(FileSource),
    Inline(InlineSource),
    List(ListSource),
}

impl SourceKind {
    /// Dynamic sources can change behind the process and are re-polled by a
    /// watcher. Inline and list sources only change with a config restart.
    pub fn is_dynamic(&self) -> bool {
        matches!(self, SourceKind::Http(_) | SourceKind::File(_))
    }

    pub async fn load(&self) -> Result<TokenMapping> {
        match self {
            SourceKind::Http(s) => s.load().await,
            SourceKind::File(s) => s.load().await,
            SourceKind::Inline(s) => s.load().await,
            SourceKind::List(s) => s.load().await,
        }
    }
}

/// Classify a configured auth source and build the matching loader.
///
/// A plain string is matched in priority order: remote URL, `file://` path,
/// inline JSON array, literal token list. A YAML string list is always a
/// literal token list.
pub fn resolve_source(auth_source: &AuthSource, client: &Client) -> SourceKind {
    match auth_source {
        AuthSource::Values(values) => SourceKind::List(ListSource::new(values.clone())),
        AuthSource::Value(value) => {
            if value.contains("http://") || value.contains("https://") {
                SourceKind::Http(HttpSource::new(value.clone(), client.clone()))
            } else if value.contains("file://") {
                SourceKind::File(FileSource::new(value.replacen("file://", "", 1)))
            } else if value.starts_with('[') && value.ends_with(']') {
                SourceKind::Inline(InlineSource::new(value.clone()))
            } else {
                SourceKind::List(ListSource::from_delimited(value))
            }
        }
    }
}

/// A JSON array declared verbatim as the configuration value.
#[derive(Debug, Clone)]
pub struct InlineSource {
    payload: String,
}

impl InlineSource {
    pub fn new(payload: String) -> Self {
        Self { payload }
    }
}

impl LoadMapping for InlineSource {
    async fn load(&self) -> Result<TokenMapping> {
        parse_bytes(SOURCE_INLINE, self.payload.as_bytes())
    }
}

/// Literal token values taken straight from configuration.
#[derive(Debug, Clone)]
pub struct ListSource {
    entries: Vec<String>,
}

impl ListSource {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Split a comma/whitespace delimited config value into token entries.
    pub fn from_delimited(value: &str) -> Self {
        let entries = value
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::to_owned)
            .collect();
        Self { entries }
    }
}

impl LoadMapping for ListSource {
    async fn load(&self) -> Result<TokenMapping> {
        Ok(parse_list(&self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(value: &str) -> SourceKind {
        resolve_source(&AuthSource::Value(value.to_owned()), &Client::new())
    }

    #[tokio::test]
    async fn url_value_resolves_to_http_source() {
        let source = resolve("https://tokens.example.com/list.json");

        assert!(source.is_dynamic());
        match source {
            SourceKind::Http(s) => assert_eq!(s.url, "https://tokens.example.com/list.json"),
            other => panic!("expected http source, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn url_match_wins_over_inline_brackets() {
        // priority: a URL anywhere in the value beats the inline-array check
        let source = resolve("[http://tokens.example.com/list.json]");

        assert!(matches!(source, SourceKind::Http(_)));
    }

    #[tokio::test]
    async fn file_value_strips_scheme_prefix() {
        let source = resolve("file:///etc/token-gate/tokens.json");

        assert!(source.is_dynamic());
        match source {
            SourceKind::File(s) => {
                assert_eq!(s.path.to_str().unwrap(), "/etc/token-gate/tokens.json")
            }
            other => panic!("expected file source, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bracketed_value_resolves_to_inline_source() {
        let source = resolve(r#"[{"token":"tok1"}]"#);

        assert!(!source.is_dynamic());
        let mapping = source.load().await.unwrap();
        assert!(mapping.contains_key("tok1"));
    }

    #[tokio::test]
    async fn plain_value_resolves_to_delimited_list() {
        let source = resolve("tok1, tok2  tok3");

        assert!(!source.is_dynamic());
        let mapping = source.load().await.unwrap();
        assert_eq!(mapping.len(), 3);
        assert!(mapping.contains_key("tok1"));
        assert!(mapping.contains_key("tok2"));
        assert!(mapping.contains_key("tok3"));
    }

    #[tokio::test]
    async fn yaml_list_resolves_to_list_source() {
        let declared = AuthSource::Values(vec!["tok1".to_string(), " tok2 ".to_string()]);
        let source = resolve_source(&declared, &Client::new());

        assert!(!source.is_dynamic());
        let mapping = source.load().await.unwrap();
        assert_eq!(mapping.len(), 2);
        assert!(mapping.contains_key("tok2"));
    }
}
