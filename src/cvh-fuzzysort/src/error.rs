//! Error types for cvh-fuzzysort
//!
//! A candidate that does not match is never an error; it is simply absent
//! from the results. Errors are reserved for bad configuration, malformed
//! prepared candidates and cancellation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A cooperative search was canceled before it resolved
    #[error("search canceled")]
    Canceled,

    /// An option value is out of range
    #[error("invalid option `{field}`: {reason}")]
    InvalidOption {
        field: &'static str,
        reason: &'static str,
    },

    /// A supplied lowercase projection has a different length than its target
    #[error("lowercase projection has {lower} characters but target has {target}")]
    ProjectionLength { target: usize, lower: usize },

    /// A supplied lowercase projection is not the lowercase form of its target
    #[error("lowercase projection differs from target at character {index}")]
    ProjectionMismatch { index: usize },

    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
