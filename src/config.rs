//! config
//!
//! Per-command metadata.
//!
//! # Overview
//!
//! [`CommandConfig`] carries the descriptive fields of a command: the short
//! description shown in its parent's listing, the usage hint shown after its
//! full name, and whether it is hidden from listings. It is plain data,
//! buildable in code or deserialized from TOML:
//!
//! ```
//! use cmdtree::config::CommandConfig;
//!
//! let cfg = CommandConfig::from_toml_str(r#"
//!     short-description = "compile packages and dependencies"
//!     short-usage = "--out output [--race] <packages>"
//! "#).unwrap();
//! assert!(!cfg.hidden);
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading command metadata.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse command config: {0}")]
    ParseError(String),
}

/// Descriptive fields of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CommandConfig {
    /// One line shown next to the name in the parent's listing.
    pub short_description: String,
    /// Text shown after the full name in the usage header.
    pub short_usage: String,
    /// Omit the command from listings; it stays invocable.
    pub hidden: bool,
}

impl CommandConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short_description(mut self, text: impl Into<String>) -> Self {
        self.short_description = text.into();
        self
    }

    pub fn short_usage(mut self, text: impl Into<String>) -> Self {
        self.short_usage = text.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Parse a config from a TOML document. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let cfg = CommandConfig::new()
            .short_description("print version")
            .short_usage("[--short]")
            .hidden(true);
        assert_eq!(cfg.short_description, "print version");
        assert_eq!(cfg.short_usage, "[--short]");
        assert!(cfg.hidden);
    }

    #[test]
    fn toml_missing_keys_default() {
        let cfg = CommandConfig::from_toml_str("hidden = true").unwrap();
        assert!(cfg.hidden);
        assert_eq!(cfg.short_description, "");
        assert_eq!(cfg.short_usage, "");
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = CommandConfig::from_toml_str("colour = \"red\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse command config"));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(
            CommandConfig::from_toml_str("").unwrap(),
            CommandConfig::default()
        );
    }
}
