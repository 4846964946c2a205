//! Error segmentation
//!
//! Rebuilds multi-line error entries from classified lines. At most one entry
//! is open at a time; it closes on the next error marker, on a timestamp
//! delimiter, or at end of input.

use crate::classifier::{log_lines, ErrorLineKind, LineClassifier};
use crate::error::{LensError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Core message of an error line and how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreMessage {
    /// Text between the marker block and the `(Count: N)` annotation
    Matched(String),
    /// The whole raw line
    Fallback(String),
}

impl CoreMessage {
    pub fn text(&self) -> &str {
        match self {
            CoreMessage::Matched(text) | CoreMessage::Fallback(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CoreMessage::Matched(text) | CoreMessage::Fallback(text) => text,
        }
    }

    pub fn extraction(&self) -> Extraction {
        match self {
            CoreMessage::Matched(_) => Extraction::Matched,
            CoreMessage::Fallback(_) => Extraction::Fallback,
        }
    }
}

/// Which extraction path produced an entry's core message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extraction {
    Matched,
    Fallback,
}

/// Two-stage core message extractor: strict pattern, else the raw line
#[derive(Debug, Clone)]
pub struct CoreMessageExtractor {
    strict: Regex,
}

impl CoreMessageExtractor {
    pub fn new(error_marker: &str) -> Result<Self> {
        let pattern = format!(
            r"{}\[.*?\]\[\]\s*(.*?)\s*\(Count:\s*\d+\)",
            regex::escape(error_marker)
        );
        let strict = Regex::new(&pattern).map_err(|e| LensError::pattern(pattern, e))?;
        Ok(Self { strict })
    }

    pub fn extract(&self, line: &str) -> CoreMessage {
        match self.strict.captures(line).and_then(|caps| caps.get(1)) {
            Some(m) => CoreMessage::Matched(m.as_str().trim().to_string()),
            None => CoreMessage::Fallback(line.to_string()),
        }
    }
}

/// One logical error occurrence, possibly spanning several lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Clustering key
    pub core_message: String,
    /// Opening line plus its continuation lines, newline-joined
    pub full_text: String,
    /// Zero-based index of the opening line
    pub line_index: usize,
    pub extraction: Extraction,
}

struct OpenEntry {
    core: CoreMessage,
    lines: Vec<String>,
    line_index: usize,
}

impl OpenEntry {
    fn close(self) -> ErrorEntry {
        let extraction = self.core.extraction();
        ErrorEntry {
            core_message: self.core.into_text(),
            full_text: self.lines.join("\n"),
            line_index: self.line_index,
            extraction,
        }
    }
}

/// Scans a document for error entries
#[derive(Debug, Clone)]
pub struct ErrorSegmenter<'c> {
    classifier: &'c LineClassifier,
    extractor: &'c CoreMessageExtractor,
}

impl<'c> ErrorSegmenter<'c> {
    pub fn new(classifier: &'c LineClassifier, extractor: &'c CoreMessageExtractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Segment `text` into error entries in order of appearance
    pub fn segment(&self, text: &str) -> Vec<ErrorEntry> {
        let mut entries = Vec::new();
        let mut open: Option<OpenEntry> = None;
        let mut noise_lines = 0usize;

        for line in log_lines(text) {
            match self.classifier.classify_for_errors(line.text) {
                ErrorLineKind::Noise => noise_lines += 1,
                ErrorLineKind::ErrorMarker => {
                    if let Some(previous) = open.take() {
                        entries.push(previous.close());
                    }
                    open = Some(OpenEntry {
                        core: self.extractor.extract(line.text),
                        lines: vec![line.text.to_string()],
                        line_index: line.index,
                    });
                }
                ErrorLineKind::Delimiter => {
                    if let Some(previous) = open.take() {
                        entries.push(previous.close());
                    }
                }
                ErrorLineKind::Plain => {
                    if let Some(current) = open.as_mut() {
                        current.lines.push(line.text.to_string());
                    }
                }
            }
        }

        if let Some(last) = open {
            entries.push(last.close());
        }

        tracing::debug!(
            entries = entries.len(),
            noise_lines,
            "segmented error entries"
        );
        entries
    }
}
