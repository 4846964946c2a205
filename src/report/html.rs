//! Self-contained HTML rendering with embedded CSS
//!
//! Each error group, table and request section collapses into a native
//! `<details>` element, so the document needs no script.

use super::{ErrorReport, QueryReport, Report, TransactionReport};

/// HTML formatter for one report
#[derive(Debug)]
pub struct HtmlReport<'r> {
    report: &'r Report,
}

impl<'r> HtmlReport<'r> {
    pub fn new(report: &'r Report) -> Self {
        Self { report }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        .section {
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
            padding: 10px 16px;
        }
        .summary {
            color: #555;
        }
        summary {
            cursor: pointer;
            color: #007bff;
            text-decoration: underline;
        }
        pre {
            font-family: monospace;
            font-size: 0.9em;
            background-color: #f9f9f9;
            border: 1px solid #ddd;
            padding: 8px;
            overflow-x: auto;
        }
        table {
            border-collapse: collapse;
            margin: 8px 0;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 4px 8px;
            text-align: left;
        }
        th {
            background-color: #4a90d9;
            color: white;
        }
        .query {
            font-family: monospace;
            font-size: 0.9em;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!(
            "    <title>{}</title>\n",
            Self::escape_html(self.report.title())
        ));
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str(&format!(
            "    <h1>{}</h1>\n",
            Self::escape_html(self.report.title())
        ));

        match self.report {
            Report::Errors(errors) => html.push_str(&Self::render_errors(errors)),
            Report::Queries(queries) => html.push_str(&Self::render_queries(queries)),
            Report::Transaction(transaction) => {
                html.push_str(&Self::render_transaction(transaction))
            }
        }

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by loglens\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }

    fn render_errors(report: &ErrorReport) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "    <p class=\"summary\">{} error entries in {} groups</p>\n",
            report.total_entries,
            report.groups.len()
        ));

        for group in &report.groups {
            html.push_str("    <div class=\"section error-section\">\n");
            html.push_str(&format!(
                "        <h2>{}</h2>\n",
                Self::escape_html(&group.representative_message)
            ));
            html.push_str(&format!("        <p>Count: {}</p>\n", group.count));
            html.push_str("        <details>\n");
            html.push_str("            <summary>Show Details</summary>\n");
            for detail in &group.details {
                html.push_str(&format!(
                    "            <pre>{}</pre>\n",
                    Self::escape_html(detail)
                ));
            }
            html.push_str("        </details>\n");
            html.push_str("    </div>\n");
        }

        html
    }

    fn render_queries(report: &QueryReport) -> String {
        let mut html = String::new();

        html.push_str(&format!(
            "    <p class=\"summary\">Overall Average Execution Time: {:.2} ms</p>\n",
            report.overall_average_ms
        ));
        html.push_str(&format!(
            "    <p class=\"summary\">{} executions, {} without table, {} malformed</p>\n",
            report.execution_count, report.dropped_count, report.malformed_count
        ));

        for table in &report.tables {
            html.push_str("    <div class=\"section table-section\">\n");
            html.push_str(&format!(
                "        <h2>{}</h2>\n",
                Self::escape_html(&table.table)
            ));
            html.push_str("        <table>\n");
            html.push_str("            <tr><th>Count</th><th>Max Execution Time</th><th>Min Execution Time</th><th>Average Execution Time</th></tr>\n");
            html.push_str(&format!(
                "            <tr><td>{}</td><td>{} ms</td><td>{} ms</td><td>{:.2} ms</td></tr>\n",
                table.count, table.max_time_ms, table.min_time_ms, table.average_time_ms
            ));
            html.push_str("        </table>\n");
            html.push_str("        <details>\n");
            html.push_str("            <summary>Toggle Queries</summary>\n");
            html.push_str("            <ul>\n");
            for query in &table.queries {
                html.push_str(&format!(
                    "                <li class=\"query\">{}</li>\n",
                    Self::escape_html(query)
                ));
            }
            html.push_str("            </ul>\n");
            html.push_str("        </details>\n");
            html.push_str("    </div>\n");
        }

        html
    }

    fn render_transaction(report: &TransactionReport) -> String {
        let mut html = String::new();

        html.push_str("    <div class=\"section\">\n");
        html.push_str(&format!(
            "        <details open>\n            <summary>Request {} ({} sections)</summary>\n",
            Self::escape_html(&report.request_id),
            report.sections
        ));
        html.push_str(&format!(
            "            <pre>{}</pre>\n",
            Self::escape_html(&report.text)
        ));
        html.push_str("        </details>\n");
        html.push_str("    </div>\n");

        html
    }
}
