//! CLI argument parsing for loglens

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// Self-contained HTML page with collapsible sections
    Html,
}

#[derive(Parser, Debug)]
#[command(name = "loglens")]
#[command(version)]
#[command(about = "Error deduplication, SQL timing and request extraction for application logs", long_about = None)]
pub struct Cli {
    /// TOML configuration file (defaults are embedded)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text, json or html)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable debug tracing to stderr
    #[arg(long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Group similar error entries and report one representative per group
    Errors {
        /// Log file to analyze
        log: PathBuf,
    },

    /// Aggregate SQL execution times per table
    Queries {
        /// Log file to analyze
        log: PathBuf,

        /// Omit tables whose average execution time is below MS
        #[arg(long = "min-time", value_name = "MS")]
        min_time: Option<f64>,
    },

    /// Extract every request section for one request id
    Transaction {
        /// Log file to analyze
        log: PathBuf,

        /// Request id written after the begin/end markers
        #[arg(long = "request-id", value_name = "ID")]
        request_id: String,
    },
}

impl Command {
    pub fn log_path(&self) -> &PathBuf {
        match self {
            Command::Errors { log }
            | Command::Queries { log, .. }
            | Command::Transaction { log, .. } => log,
        }
    }
}
