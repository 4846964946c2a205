use crate::error::{LensError, Result};
use regex::Regex;

/// Clause keyword followed by a `"schema"."table"` pair; captures the table
const TABLE_PATTERN: &str = r#"(?i)\b(?:FROM|JOIN|UPDATE|INTO)\s+"[^"]+"\."([^"]+)""#;

/// Pulls referenced table names out of SQL text
///
/// Only schema-qualified, double-quoted identifiers are recognized. Anything
/// else (bare names, bracket quoting, escaped quotes) yields no table and the
/// statement is left out of per-table statistics.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    pattern: Regex,
}

impl TableExtractor {
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(TABLE_PATTERN).map_err(|e| LensError::pattern(TABLE_PATTERN, e))?;
        Ok(Self { pattern })
    }

    /// Distinct table names in order of first reference
    pub fn extract(&self, sql: &str) -> Vec<String> {
        let mut tables: Vec<String> = Vec::new();
        for caps in self.pattern.captures_iter(sql) {
            if let Some(table) = caps.get(1) {
                if !tables.iter().any(|t| t == table.as_str()) {
                    tables.push(table.as_str().to_string());
                }
            }
        }
        tables
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(sql: &str) -> Vec<String> {
        TableExtractor::new().unwrap().extract(sql)
    }

    #[test]
    fn test_from_clause() {
        assert_eq!(
            extract(r#"SELECT o."Id" FROM "Sales"."Orders" AS o WHERE o."Id" = @p0"#),
            vec!["Orders"]
        );
    }

    #[test]
    fn test_all_clause_keywords() {
        let sql = r#"INSERT INTO "A"."Audit" SELECT * FROM "S"."Orders" o JOIN "S"."Lines" l ON 1=1; UPDATE "S"."Stock" SET "Qty" = 1"#;
        assert_eq!(extract(sql), vec!["Audit", "Orders", "Lines", "Stock"]);
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            extract(r#"select * from "Sales"."Orders" inner join "Sales"."Customers" c on 1=1"#),
            vec!["Orders", "Customers"]
        );
    }

    #[test]
    fn test_duplicates_removed() {
        assert_eq!(
            extract(r#"SELECT * FROM "S"."Orders" WHERE "Id" IN (SELECT "Id" FROM "S"."Orders")"#),
            vec!["Orders"]
        );
    }

    #[test]
    fn test_same_table_different_schema_counts_once() {
        assert_eq!(
            extract(r#"SELECT * FROM "A"."Orders" JOIN "B"."Orders" ON 1=1"#),
            vec!["Orders"]
        );
    }

    #[test]
    fn test_unqualified_or_unquoted_ignored() {
        assert!(extract("SELECT * FROM Orders").is_empty());
        assert!(extract(r#"SELECT * FROM "Orders""#).is_empty());
        assert!(extract("SELECT * FROM [dbo].[Orders]").is_empty());
    }

    #[test]
    fn test_keyword_must_be_whole_word() {
        assert!(extract(r#"SELECT "x"."y" AS TRANSFROM "S"."T""#).is_empty());
    }
}
