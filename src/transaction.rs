//! Correlated request extraction
//!
//! A request section opens with `===BEGIN REQUEST===` followed by the request
//! id and closes with `===END REQUEST===` followed by the same id. Sections
//! may span any number of lines.

use crate::classifier::{
    LineClassifier, TransactionBoundary, BEGIN_REQUEST_MARKER, END_REQUEST_MARKER,
};
use crate::error::{LensError, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Text of every section tagged with one request id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSection {
    pub request_id: String,
    /// Matched sections joined by a blank line; empty when nothing matched
    pub text: String,
    pub sections: usize,
}

impl TransactionSection {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Collect every non-overlapping section tagged with `request_id`
///
/// The id is matched literally and must be followed by whitespace or the end
/// of input after both markers, so `R1` never selects a section tagged `R10`.
/// Sections are concatenated in order of appearance, separated by a blank
/// line, and the result is trimmed.
pub fn extract_sections(text: &str, request_id: &str) -> Result<TransactionSection> {
    if request_id.trim().is_empty() {
        return Err(LensError::EmptyRequestId);
    }

    let id = regex::escape(request_id);
    // The regex crate has no lookahead: the boundary after the closing id is
    // matched outside the captured section.
    let pattern = format!(
        r"({}\s*{}(?:\s|\z).*?{}\s*{})(?:\s|\z)",
        regex::escape(BEGIN_REQUEST_MARKER),
        id,
        regex::escape(END_REQUEST_MARKER),
        id
    );
    let region = RegexBuilder::new(&pattern)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| LensError::pattern(pattern.clone(), e))?;

    let matches: Vec<&str> = region
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    if matches.is_empty() {
        let begins = text
            .lines()
            .filter(|line| LineClassifier::transaction_boundary(line) == Some(TransactionBoundary::Begin))
            .count();
        tracing::debug!(
            request_id,
            begin_markers = begins,
            "no request section matched"
        );
    } else {
        tracing::debug!(request_id, sections = matches.len(), "extracted request sections");
    }

    Ok(TransactionSection {
        request_id: request_id.to_string(),
        text: matches.join("\n\n").trim().to_string(),
        sections: matches.len(),
    })
}
