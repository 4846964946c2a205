use super::stats::{TableStats, TableStatsTracker};
use super::tables::TableExtractor;
use crate::classifier::{log_lines, ExecutionMarker, LineClassifier, LogLine};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One SQL statement with its timing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryExecution {
    pub sql: String,
    pub execution_time_ms: u64,
    pub tables: Vec<String>,
}

/// Result of a query analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryAnalysis {
    /// Per-table statistics in order of first reference
    pub tables: IndexMap<String, TableStats>,
    /// Mean over every execution with a parsed duration, with or without tables
    pub overall_average_ms: f64,
    /// Executions with a parsed duration and SQL text
    pub execution_count: usize,
    /// Executions left out of per-table statistics for lack of a table name
    pub dropped_count: usize,
    /// Marker lines whose duration could not be parsed
    pub malformed_count: usize,
}

/// Cursor-based scanner for executed SQL statements
#[derive(Debug, Clone)]
pub struct QueryAggregator<'c> {
    classifier: &'c LineClassifier,
    extractor: &'c TableExtractor,
}

impl<'c> QueryAggregator<'c> {
    pub fn new(classifier: &'c LineClassifier, extractor: &'c TableExtractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Every execution in `text`, in input order
    ///
    /// The second element counts malformed marker lines.
    pub fn executions(&self, text: &str) -> (Vec<QueryExecution>, usize) {
        let lines: Vec<LogLine<'_>> = log_lines(text).collect();
        let mut executions = Vec::new();
        let mut malformed = 0usize;
        let mut cursor = 0usize;

        while cursor < lines.len() {
            let execution_time_ms = match self.classifier.execution_marker(lines[cursor].text) {
                None => {
                    cursor += 1;
                    continue;
                }
                Some(ExecutionMarker::Malformed) => {
                    tracing::trace!(line = lines[cursor].index, "skipping malformed execution marker");
                    malformed += 1;
                    cursor += 1;
                    continue;
                }
                Some(ExecutionMarker::Duration(ms)) => ms,
            };

            // The statement runs until a blank line or the next bracketed record;
            // that terminating line is examined again by the outer loop.
            cursor += 1;
            let mut parts: Vec<&str> = Vec::new();
            while let Some(line) = lines.get(cursor) {
                if line.text.is_empty() || LineClassifier::starts_record(line.text) {
                    break;
                }
                parts.push(line.text);
                cursor += 1;
            }

            if parts.is_empty() {
                continue;
            }

            let sql = parts.join(" ");
            let tables = self.extractor.extract(&sql);
            executions.push(QueryExecution {
                sql,
                execution_time_ms,
                tables,
            });
        }

        (executions, malformed)
    }

    /// Aggregate executions per table
    ///
    /// Tables whose average time is below `min_average_ms` are removed after
    /// aggregation; they still count toward the overall average.
    pub fn aggregate(&self, text: &str, min_average_ms: Option<f64>) -> QueryAnalysis {
        let (executions, malformed_count) = self.executions(text);

        let mut tracker = TableStatsTracker::new();
        let mut total_ms: u128 = 0;
        let mut dropped_count = 0usize;

        for execution in &executions {
            total_ms += u128::from(execution.execution_time_ms);
            if execution.tables.is_empty() {
                tracing::trace!(sql = %execution.sql, "no table found, dropping execution");
                dropped_count += 1;
                continue;
            }
            for table in &execution.tables {
                tracker.record(table, &execution.sql, execution.execution_time_ms);
            }
        }

        let overall_average_ms = if executions.is_empty() {
            0.0
        } else {
            total_ms as f64 / executions.len() as f64
        };

        let mut tables = tracker.finish();
        if let Some(min) = min_average_ms {
            let before = tables.len();
            tables.retain(|_, stats| stats.average_time_ms >= min);
            tracing::debug!(
                min_average_ms = min,
                removed = before - tables.len(),
                "applied minimum average filter"
            );
        }

        tracing::debug!(
            executions = executions.len(),
            tables = tables.len(),
            dropped = dropped_count,
            malformed = malformed_count,
            "aggregated query executions"
        );

        QueryAnalysis {
            tables,
            overall_average_ms,
            execution_count: executions.len(),
            dropped_count,
            malformed_count,
        }
    }
}
