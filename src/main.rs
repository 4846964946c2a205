use anyhow::{Context, Result};
use clap::Parser;
use loglens::cli::{Cli, Command};
use loglens::report::{self, ErrorReport, QueryReport, Report, TransactionReport};
use loglens::{read_log, Analyzer, AnalyzerConfig};
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Cli) -> Result<AnalyzerConfig> {
    match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => AnalyzerConfig::embedded().context("Failed to load embedded config"),
    }
}

fn run(analyzer: &Analyzer, command: &Command) -> Result<Report> {
    let text = read_log(command.log_path())?;

    let report = match command {
        Command::Errors { .. } => {
            let groups = analyzer.analyze_errors(&text);
            Report::Errors(ErrorReport::from_groups(&groups))
        }
        Command::Queries { min_time, .. } => {
            if let Some(min) = min_time {
                if !min.is_finite() || *min < 0.0 {
                    anyhow::bail!(
                        "Invalid value for --min-time: {} (must be a non-negative number)",
                        min
                    );
                }
            }
            let analysis = analyzer.analyze_queries(&text, *min_time);
            Report::Queries(QueryReport::from_analysis(&analysis, *min_time))
        }
        Command::Transaction { request_id, .. } => {
            let section = analyzer.transaction_sections(&text, request_id)?;
            if section.is_empty() {
                anyhow::bail!(
                    "failed to process transaction with request_id {}",
                    request_id
                );
            }
            Report::Transaction(TransactionReport::from_section(&section))
        }
    };

    Ok(report)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = load_config(&args)?;
    let analyzer = Analyzer::new(config)?;

    let report = run(&analyzer, &args.command)?;
    let mut rendered = report::render(&report, args.format)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::debug!(path = %path.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
