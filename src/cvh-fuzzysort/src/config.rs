//! Configuration module for cvh-fuzzysort

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Matching and rendering options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Give up on a candidate after this many characters without a match
    #[serde(default = "default_no_match_limit")]
    pub no_match_limit: usize,

    /// Render highlighted strings for results
    #[serde(default = "default_true")]
    pub highlight: bool,

    /// Marker inserted before each run of matched characters
    #[serde(default = "default_highlight_open")]
    pub highlight_open: String,

    /// Marker inserted after each run of matched characters
    #[serde(default = "default_highlight_close")]
    pub highlight_close: String,

    /// Maximum number of results returned by batch searches
    #[serde(default)]
    pub limit: Option<usize>,

    /// Score multiplier for candidates without a boundary-preferring match
    #[serde(default = "default_loose_penalty")]
    pub loose_penalty: u64,

    /// Time budget of one cooperative slice, in milliseconds
    #[serde(default = "default_slice_ms")]
    pub slice_ms: u64,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            no_match_limit: default_no_match_limit(),
            highlight: default_true(),
            highlight_open: default_highlight_open(),
            highlight_close: default_highlight_close(),
            limit: None,
            loose_penalty: default_loose_penalty(),
            slice_ms: default_slice_ms(),
        }
    }
}

fn default_no_match_limit() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_loose_penalty() -> u64 {
    1000
}

fn default_slice_ms() -> u64 {
    12
}

fn default_highlight_open() -> String {
    "<b>".to_string()
}

fn default_highlight_close() -> String {
    "</b>".to_string()
}

impl Options {
    /// Load options from an explicit file, the XDG config file, or defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        // Try explicit path first
        if let Some(p) = path {
            if p.exists() {
                return Self::from_file(p);
            }
        }

        // Try XDG config
        if let Some(config_dir) = dirs::config_dir() {
            let config_file = config_dir.join("cvh-fuzzysort/config.toml");
            if config_file.exists() {
                return Self::from_file(&config_file);
            }
        }

        Ok(Self::default())
    }

    /// Parse and validate options from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content)?;
        options.validate()?;
        Ok(options)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Reject values that would make every query misbehave
    pub fn validate(&self) -> Result<()> {
        if self.no_match_limit == 0 {
            return Err(Error::InvalidOption {
                field: "no_match_limit",
                reason: "must be at least 1",
            });
        }
        if self.loose_penalty == 0 {
            return Err(Error::InvalidOption {
                field: "loose_penalty",
                reason: "must be at least 1",
            });
        }
        if self.highlight && self.highlight_open.is_empty() && self.highlight_close.is_empty() {
            tracing::warn!("highlighting enabled with empty markers");
        }
        Ok(())
    }
}
