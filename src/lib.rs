//! Loglens - application log analysis
//!
//! This library groups similar error entries by TF-IDF cosine similarity,
//! aggregates SQL execution times per table, and extracts every log section
//! belonging to one request id. All analyses are pure functions over an
//! in-memory copy of the log text.

pub mod analyzer;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod report;
pub mod segmenter;
pub mod similarity;
pub mod transaction;

pub use analyzer::{read_log, Analyzer};
pub use config::AnalyzerConfig;
pub use error::{LensError, Result};
pub use query::{QueryAnalysis, TableStats};
pub use segmenter::{CoreMessage, ErrorEntry, Extraction};
pub use similarity::ErrorGroup;
