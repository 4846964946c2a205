use super::Report;
use crate::error::Result;

/// Pretty-printed JSON, tagged with the report `kind`
pub fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{QueryReport, TableReport, TransactionReport};

    #[test]
    fn test_transaction_json_round_trip() {
        let report = Report::Transaction(TransactionReport {
            request_id: "R1".to_string(),
            sections: 1,
            text: "===BEGIN REQUEST===\nR1".to_string(),
        });

        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "transaction");
        assert_eq!(value["request_id"], "R1");
        assert_eq!(value["sections"], 1);
    }

    #[test]
    fn test_query_json_fields() {
        let report = Report::Queries(QueryReport {
            overall_average_ms: 150.0,
            execution_count: 2,
            dropped_count: 0,
            malformed_count: 0,
            min_average_ms: None,
            tables: vec![TableReport {
                table: "Orders".to_string(),
                count: 2,
                total_time_ms: 300,
                min_time_ms: 100,
                max_time_ms: 200,
                average_time_ms: 150.0,
                queries: vec!["q1".to_string(), "q2".to_string()],
            }],
        });

        let value: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(value["kind"], "queries");
        assert!(value.get("min_average_ms").is_none());
        assert_eq!(value["tables"][0]["table"], "Orders");
        assert_eq!(value["tables"][0]["total_time_ms"], 300);
        assert_eq!(value["tables"][0]["average_time_ms"], 150.0);
    }
}
