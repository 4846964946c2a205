//! Line-level signal recognition
//!
//! Every test here is an independent, stateless check over one trimmed line.
//! The signals are not mutually exclusive; the error segmenter and the query
//! aggregator each consume them in their own priority order.

use crate::config::AnalyzerConfig;
use crate::error::{LensError, Result};
use regex::Regex;

/// Start of a correlated request section
pub const BEGIN_REQUEST_MARKER: &str = "===BEGIN REQUEST===";

/// End of a correlated request section
pub const END_REQUEST_MARKER: &str = "===END REQUEST===";

const DELIMITER_PATTERN: &str = r"^\[\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}\]";

/// One line of input, trimmed, with its zero-based position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine<'a> {
    pub text: &'a str,
    pub index: usize,
}

/// Split a document into trimmed lines
pub fn log_lines(text: &str) -> impl Iterator<Item = LogLine<'_>> {
    text.lines().enumerate().map(|(index, line)| LogLine {
        text: line.trim(),
        index,
    })
}

/// How the error segmenter sees a line, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorLineKind {
    /// Contains an excluded pattern; dropped before anything else
    Noise,
    /// Opens a new error entry
    ErrorMarker,
    /// Starts a new timestamped record
    Delimiter,
    /// Anything else
    Plain,
}

/// Outcome of looking for an execution marker on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMarker {
    /// Marker with a parsed duration in milliseconds
    Duration(u64),
    /// Marker present but its duration annotation is unusable
    Malformed,
}

/// Request section boundary found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionBoundary {
    Begin,
    End,
}

/// Compiled line tests for one analyzer configuration
#[derive(Debug, Clone)]
pub struct LineClassifier {
    excluded_patterns: Vec<String>,
    error_marker: String,
    query_marker: String,
    delimiter: Regex,
    execution_time: Regex,
}

impl LineClassifier {
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let delimiter =
            Regex::new(DELIMITER_PATTERN).map_err(|e| LensError::pattern(DELIMITER_PATTERN, e))?;

        let execution_pattern = format!(r"{} \((\d+)ms\)", regex::escape(&config.query_marker));
        let execution_time =
            Regex::new(&execution_pattern).map_err(|e| LensError::pattern(execution_pattern, e))?;

        Ok(Self {
            excluded_patterns: config.excluded_patterns.clone(),
            error_marker: config.error_marker.clone(),
            query_marker: config.query_marker.clone(),
            delimiter,
            execution_time,
        })
    }

    /// Line contains any excluded substring
    pub fn is_noise(&self, line: &str) -> bool {
        self.excluded_patterns.iter().any(|p| line.contains(p.as_str()))
    }

    pub fn is_error_marker(&self, line: &str) -> bool {
        line.contains(self.error_marker.as_str())
    }

    /// Line begins with a bracketed ISO-8601 timestamp
    pub fn is_delimiter(&self, line: &str) -> bool {
        self.delimiter.is_match(line)
    }

    /// Line begins a new bracketed record of any kind
    pub fn starts_record(line: &str) -> bool {
        line.starts_with('[')
    }

    /// Classify a line for error segmentation; noise wins over every other signal
    pub fn classify_for_errors(&self, line: &str) -> ErrorLineKind {
        if self.is_noise(line) {
            ErrorLineKind::Noise
        } else if self.is_error_marker(line) {
            ErrorLineKind::ErrorMarker
        } else if self.is_delimiter(line) {
            ErrorLineKind::Delimiter
        } else {
            ErrorLineKind::Plain
        }
    }

    /// Find an execution marker and its duration
    ///
    /// Returns `None` when the line carries no marker at all.
    pub fn execution_marker(&self, line: &str) -> Option<ExecutionMarker> {
        if !line.contains(self.query_marker.as_str()) {
            return None;
        }

        let duration = self
            .execution_time
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u64>().ok());

        Some(match duration {
            Some(ms) => ExecutionMarker::Duration(ms),
            None => ExecutionMarker::Malformed,
        })
    }

    /// Begin/end request marker carried by a line
    pub fn transaction_boundary(line: &str) -> Option<TransactionBoundary> {
        if line.contains(BEGIN_REQUEST_MARKER) {
            Some(TransactionBoundary::Begin)
        } else if line.contains(END_REQUEST_MARKER) {
            Some(TransactionBoundary::End)
        } else {
            None
        }
    }
}
