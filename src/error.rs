//! Error type for the analysis library
//!
//! Only contract violations and I/O or configuration problems are errors.
//! An analysis that finds nothing returns an empty result instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by loglens operations
#[derive(Error, Debug)]
pub enum LensError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Request id must not be empty")]
    EmptyRequestId,

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LensError>;

impl LensError {
    pub(crate) fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
