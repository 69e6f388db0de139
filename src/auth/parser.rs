use anyhow::{anyhow, Result};

use crate::auth::token::{Token, TokenMapping};

/// Parse an allow-list payload into a token mapping.
///
/// The payload must be a JSON array of either token objects
/// (`{"token": "...", "origins": [...]}`) or bare strings; a bare string is a
/// token with no origin restriction. `source` names where the payload came
/// from and only appears in the error message.
pub fn parse_bytes(source: &str, bytes: &[u8]) -> Result<TokenMapping> {
    let tokens: Vec<Token> = match serde_json::from_slice(bytes) {
        Ok(tokens) => tokens,
        Err(_) => {
            // not an object array, retry as a plain string array
            let values: Vec<String> = serde_json::from_slice(bytes).map_err(|e| {
                anyhow!(
                    "error decoding tokens from {}: payload must be a JSON token array or string array: {}",
                    source,
                    e
                )
            })?;
            values
                .into_iter()
                .map(|value| Token {
                    value,
                    origins: Vec::new(),
                })
                .collect()
        }
    };

    let mut mapping = TokenMapping::new();
    for token in tokens {
        let trimmed = token.value.trim();
        if trimmed.is_empty() {
            continue;
        }
        mapping.insert(trimmed.to_owned(), token.origins);
    }

    Ok(mapping)
}

/// Build a mapping from literal token strings declared directly in
/// configuration. Entries are trimmed, blanks dropped, origins left empty.
pub fn parse_list(entries: &[String]) -> TokenMapping {
    let mut mapping = TokenMapping::new();
    for entry in entries {
        let trimmed = entry.trim();
        if !trimmed.is_empty() {
            mapping.insert(trimmed.to_owned(), Vec::new());
        }
    }
    mapping
}
