//! Analyzer configuration
//!
//! The similarity threshold, the noise list and the line markers have no
//! derivation beyond "they worked on real logs", so they live here as
//! configuration with documented defaults rather than inline constants.

use crate::error::{LensError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Minimum cosine similarity (inclusive) at which two error messages are linked
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Token identifying an error line
pub const DEFAULT_ERROR_MARKER: &str = "[ERR]";

/// Marker preceding the `(<N>ms)` duration of an executed statement
pub const DEFAULT_QUERY_MARKER: &str = "Executed DbCommand";

/// Substrings that make a line noise for the error analysis
///
/// Reserved SQL keywords plus a handful of high-volume tables whose chatter
/// drowns out real errors.
pub const DEFAULT_EXCLUDED_PATTERNS: &[&str] = &[
    "\"Feature\".\"EbmsJob\"",
    "SELECT",
    "AS",
    "FROM",
    "WHERE",
    "ORDERBY",
    "INSERT",
    "INNER",
    "VALUES",
    "ORDER",
    "UPDATE",
    "RETURNING",
    "LIMIT",
    "\"Liner\".\"VoyageMasterDtl\"",
    "\"Global\".\"JobCardTypeMaster\"",
    "\"Global\".\"PortMaster\"",
    "\"Common\".\"DocSeqControlMaster\"",
    "\"Common\".\"DocPrefixMasterDtl\"",
    "\"Common\".\"LocationMaster\"",
];

/// Configuration shared by all analyses
///
/// # Example TOML
/// ```toml
/// similarity_threshold = 0.5
/// excluded_patterns = ["HealthCheck"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Minimum similarity for two error messages to share a group (0.0-1.0)
    pub similarity_threshold: f64,

    /// Lines containing any of these substrings never reach the error segmenter
    pub excluded_patterns: Vec<String>,

    /// Token that opens an error entry
    pub error_marker: String,

    /// Marker of an executed SQL statement
    pub query_marker: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            excluded_patterns: DEFAULT_EXCLUDED_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
            query_marker: DEFAULT_QUERY_MARKER.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Configuration shipped inside the binary (`loglens-default.toml`)
    pub fn embedded() -> Result<Self> {
        const DEFAULT_TOML: &str = include_str!("../loglens-default.toml");
        Self::from_toml_str(DEFAULT_TOML)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LensError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Override the similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(LensError::InvalidConfig(format!(
                "similarity_threshold must be in [0, 1], got {}",
                self.similarity_threshold
            )));
        }

        if self.error_marker.is_empty() {
            return Err(LensError::InvalidConfig(
                "error_marker must not be empty".to_string(),
            ));
        }

        if self.query_marker.is_empty() {
            return Err(LensError::InvalidConfig(
                "query_marker must not be empty".to_string(),
            ));
        }

        // An empty pattern is a substring of every line and would silence the
        // whole error analysis.
        if let Some(pos) = self.excluded_patterns.iter().position(|p| p.is_empty()) {
            return Err(LensError::InvalidConfig(format!(
                "excluded_patterns[{}] must not be empty",
                pos
            )));
        }

        Ok(())
    }
}
