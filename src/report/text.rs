use super::{ErrorReport, QueryReport, Report, TransactionReport};

/// Human-readable plain text rendering
pub fn to_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(report.title());
    out.push('\n');
    out.push_str(&"=".repeat(report.title().len()));
    out.push('\n');

    match report {
        Report::Errors(errors) => out.push_str(&render_errors(errors)),
        Report::Queries(queries) => out.push_str(&render_queries(queries)),
        Report::Transaction(transaction) => out.push_str(&render_transaction(transaction)),
    }

    out
}

fn render_errors(report: &ErrorReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} error entries in {} groups\n",
        report.total_entries,
        report.groups.len()
    ));

    for group in &report.groups {
        out.push('\n');
        out.push_str(&format!(
            "[{}] {}\n",
            group.count, group.representative_message
        ));
        for detail in &group.details {
            for line in detail.lines() {
                out.push_str(&format!("    {}\n", line));
            }
            out.push_str("    --\n");
        }
    }

    out
}

fn render_queries(report: &QueryReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Overall Average Execution Time: {:.2} ms ({} executions, {} without table, {} malformed)\n",
        report.overall_average_ms,
        report.execution_count,
        report.dropped_count,
        report.malformed_count
    ));
    if let Some(min) = report.min_average_ms {
        out.push_str(&format!(
            "Tables with average below {:.2} ms omitted\n",
            min
        ));
    }

    for table in &report.tables {
        out.push('\n');
        out.push_str(&format!("{}\n", table.table));
        out.push_str(&format!("  Count: {}\n", table.count));
        out.push_str(&format!("  Max Execution Time: {} ms\n", table.max_time_ms));
        out.push_str(&format!("  Min Execution Time: {} ms\n", table.min_time_ms));
        out.push_str(&format!(
            "  Average Execution Time: {:.2} ms\n",
            table.average_time_ms
        ));
        for query in &table.queries {
            out.push_str(&format!("    - {}\n", query));
        }
    }

    out
}

fn render_transaction(report: &TransactionReport) -> String {
    format!(
        "Request {} ({} sections)\n\n{}\n",
        report.request_id, report.sections, report.text
    )
}
