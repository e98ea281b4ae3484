use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Runtime knobs for an [`Extractor`](crate::engine::Extractor).
///
/// Every field is optional in the JSON form:
///
/// ```json
/// { "max_input_bytes": 1048576, "categories": ["email", "url"], "exclude": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    /// Inputs longer than this fault every category instead of being scanned.
    pub max_input_bytes: Option<usize>,
    /// Restrict extraction to these categories. Empty means all.
    pub categories: Vec<String>,
    pub exclude: Vec<String>,
}

impl ExtractorConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Resolve `categories`/`exclude` against the registered names, keeping
    /// registration order.
    pub fn selected<'a>(&self, registered: &[&'a str]) -> Vec<&'a str> {
        registered
            .iter()
            .copied()
            .filter(|name| self.categories.is_empty() || self.categories.iter().any(|c| c == name))
            .filter(|name| !self.exclude.iter().any(|c| c == name))
            .collect()
    }
}
