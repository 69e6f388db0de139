use anyhow::{anyhow, Context, Result};
use reqwest::Client;

use crate::auth::parser::parse_bytes;
use crate::auth::token::TokenMapping;
use crate::sources::LoadMapping;

/// Remote allow-list fetched over HTTP. The URL doubles as the source label
/// in parse errors.
#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: String, client: Client) -> Self {
        Self { url, client }
    }
}

impl LoadMapping for HttpSource {
    async fn load(&self) -> Result<TokenMapping> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "request to {} returned {}",
                self.url,
                response.status()
            ));
        }

        let body = response.bytes().await?;
        parse_bytes(&self.url, &body)
    }
}
