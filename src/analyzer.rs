//! Entry points for the three analyses
//!
//! An [`Analyzer`] compiles every pattern once from an [`AnalyzerConfig`] and
//! can then be reused for any number of inputs. It holds no state between
//! calls, so repeated runs on the same text return the same result.

use crate::classifier::LineClassifier;
use crate::config::AnalyzerConfig;
use crate::error::{LensError, Result};
use crate::query::{QueryAggregator, QueryAnalysis, TableExtractor};
use crate::segmenter::{CoreMessageExtractor, ErrorEntry, ErrorSegmenter};
use crate::similarity::{ErrorGroup, SimilarityClusterer};
use crate::transaction::{self, TransactionSection};
use std::fs;
use std::path::Path;

/// Log analyzer for error grouping, SQL timing and request extraction
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    classifier: LineClassifier,
    extractor: CoreMessageExtractor,
    tables: TableExtractor,
    clusterer: SimilarityClusterer,
}

impl Analyzer {
    /// Validate `config` and compile its patterns
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            classifier: LineClassifier::new(&config)?,
            extractor: CoreMessageExtractor::new(&config.error_marker)?,
            tables: TableExtractor::new()?,
            clusterer: SimilarityClusterer::new(config.similarity_threshold)?,
            config,
        })
    }

    /// Analyzer with the built-in defaults
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalyzerConfig::default())
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Split `text` into error entries without grouping them
    pub fn error_entries(&self, text: &str) -> Vec<ErrorEntry> {
        ErrorSegmenter::new(&self.classifier, &self.extractor).segment(text)
    }

    /// Group similar error entries
    ///
    /// Groups come out in order of their lowest-index member. Text without
    /// error entries yields no groups.
    pub fn analyze_errors(&self, text: &str) -> Vec<ErrorGroup> {
        let entries = self.error_entries(text);
        self.clusterer.cluster(entries)
    }

    /// Aggregate SQL execution times per table
    pub fn analyze_queries(&self, text: &str, min_average_ms: Option<f64>) -> QueryAnalysis {
        QueryAggregator::new(&self.classifier, &self.tables).aggregate(text, min_average_ms)
    }

    /// Sections tagged with `request_id`, with their count
    pub fn transaction_sections(&self, text: &str, request_id: &str) -> Result<TransactionSection> {
        transaction::extract_sections(text, request_id)
    }

    /// Text of every section tagged with `request_id`
    ///
    /// An empty string means no section matched.
    pub fn extract_transaction(&self, text: &str, request_id: &str) -> Result<String> {
        Ok(self.transaction_sections(text, request_id)?.text)
    }
}

/// Read a whole log file, replacing invalid UTF-8 sequences
pub fn read_log<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LensError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read log file");
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
