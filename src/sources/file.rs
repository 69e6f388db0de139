use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::auth::parser::parse_bytes;
use crate::auth::token::TokenMapping;
use crate::sources::LoadMapping;

/// Allow-list read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LoadMapping for FileSource {
    async fn load(&self) -> Result<TokenMapping> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading {} failed", self.path.display()))?;
        parse_bytes(&self.path.to_string_lossy(), &bytes)
    }
}
