use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Deserialize;

/// Wire form of one allow-list entry: `{"token": "...", "origins": ["..."]}`.
/// Both fields may be omitted; an empty `origins` list means the token is not
/// restricted to any origin.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    #[serde(rename = "token", default)]
    pub value: String,
    #[serde(default)]
    pub origins: Vec<String>,
}

/// Token value -> permitted origins. Built whole on every load and installed
/// by reference swap, never mutated key-by-key.
pub type TokenMapping = HashMap<String, Vec<String>>;

/// The two independently refreshed token classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Client-to-server tokens: origin restrictions are meaningful here.
    C2s,
    /// Server-to-server tokens: typically unrestricted, handled identically.
    S2s,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::C2s => "c2s",
            TokenKind::S2s => "s2s",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c2s" => Ok(TokenKind::C2s),
            "s2s" => Ok(TokenKind::S2s),
            other => Err(anyhow!("unknown token kind '{}'", other)),
        }
    }
}
