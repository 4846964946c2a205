//! Report model handed to the rendering layer
//!
//! Plain, serializable structures built from the analysis results. Renderers
//! only ever see these types.

mod html;
mod json;
mod text;

pub use html::HtmlReport;
pub use json::to_json;
pub use text::to_text;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::query::QueryAnalysis;
use crate::similarity::ErrorGroup;
use crate::transaction::TransactionSection;
use serde::{Deserialize, Serialize};

/// One error group as shown to the reader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorGroupReport {
    pub representative_message: String,
    pub count: usize,
    /// Full text of every member entry
    pub details: Vec<String>,
}

/// Deduplicated error summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub total_entries: usize,
    pub groups: Vec<ErrorGroupReport>,
}

impl ErrorReport {
    pub fn from_groups(groups: &[ErrorGroup]) -> Self {
        let groups: Vec<ErrorGroupReport> = groups
            .iter()
            .map(|g| ErrorGroupReport {
                representative_message: g.representative_message.clone(),
                count: g.count,
                details: g.details().map(str::to_string).collect(),
            })
            .collect();

        Self {
            total_entries: groups.iter().map(|g| g.count).sum(),
            groups,
        }
    }
}

/// Statistics for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub count: usize,
    pub total_time_ms: u128,
    pub min_time_ms: u64,
    pub max_time_ms: u64,
    pub average_time_ms: f64,
    pub queries: Vec<String>,
}

/// SQL performance summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    pub overall_average_ms: f64,
    pub execution_count: usize,
    pub dropped_count: usize,
    pub malformed_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_average_ms: Option<f64>,
    pub tables: Vec<TableReport>,
}

impl QueryReport {
    pub fn from_analysis(analysis: &QueryAnalysis, min_average_ms: Option<f64>) -> Self {
        let tables = analysis
            .tables
            .iter()
            .map(|(name, stats)| TableReport {
                table: name.clone(),
                count: stats.count,
                total_time_ms: stats.total_time_ms,
                min_time_ms: stats.min_time_ms,
                max_time_ms: stats.max_time_ms,
                average_time_ms: stats.average_time_ms,
                queries: stats.queries.clone(),
            })
            .collect();

        Self {
            overall_average_ms: analysis.overall_average_ms,
            execution_count: analysis.execution_count,
            dropped_count: analysis.dropped_count,
            malformed_count: analysis.malformed_count,
            min_average_ms,
            tables,
        }
    }
}

/// Extracted request sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReport {
    pub request_id: String,
    pub sections: usize,
    pub text: String,
}

impl TransactionReport {
    pub fn from_section(section: &TransactionSection) -> Self {
        Self {
            request_id: section.request_id.clone(),
            sections: section.sections,
            text: section.text.clone(),
        }
    }
}

/// Any of the three reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Report {
    Errors(ErrorReport),
    Queries(QueryReport),
    Transaction(TransactionReport),
}

impl Report {
    pub fn title(&self) -> &'static str {
        match self {
            Report::Errors(_) => "Error Log",
            Report::Queries(_) => "SQL Query Report",
            Report::Transaction(_) => "Extracted Request Sections",
        }
    }
}

/// Render a report in the requested format
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(to_text(report)),
        OutputFormat::Json => to_json(report),
        OutputFormat::Html => Ok(HtmlReport::new(report).to_html()),
    }
}
