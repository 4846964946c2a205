use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregate over every execution that referenced one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    /// Number of executions folded in (always `queries.len()`)
    pub count: usize,
    /// Sum of folded execution times (milliseconds); wide enough that it never overflows
    pub total_time_ms: u128,
    pub min_time_ms: u64,
    pub max_time_ms: u64,
    /// `total_time_ms / count`, computed once aggregation is complete
    pub average_time_ms: f64,
    /// SQL text of each execution, in input order
    pub queries: Vec<String>,
}

impl TableStats {
    fn first(sql: &str, execution_time_ms: u64) -> Self {
        Self {
            count: 1,
            total_time_ms: u128::from(execution_time_ms),
            min_time_ms: execution_time_ms,
            max_time_ms: execution_time_ms,
            average_time_ms: 0.0,
            queries: vec![sql.to_string()],
        }
    }

    fn fold(&mut self, sql: &str, execution_time_ms: u64) {
        self.count += 1;
        self.total_time_ms += u128::from(execution_time_ms);
        self.min_time_ms = self.min_time_ms.min(execution_time_ms);
        self.max_time_ms = self.max_time_ms.max(execution_time_ms);
        self.queries.push(sql.to_string());
    }

    fn finalize(&mut self) {
        self.average_time_ms = if self.count > 0 {
            self.total_time_ms as f64 / self.count as f64
        } else {
            0.0
        };
    }
}

/// Tracks statistics for all tables
#[derive(Debug, Default)]
pub struct TableStatsTracker {
    /// Table name to statistics, in order of first reference
    stats: IndexMap<String, TableStats>,
}

impl TableStatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one execution against `table`
    pub fn record(&mut self, table: &str, sql: &str, execution_time_ms: u64) {
        match self.stats.get_mut(table) {
            Some(stats) => stats.fold(sql, execution_time_ms),
            None => {
                self.stats
                    .insert(table.to_string(), TableStats::first(sql, execution_time_ms));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Compute averages and hand over the per-table map
    pub fn finish(self) -> IndexMap<String, TableStats> {
        let mut stats = self.stats;
        for table in stats.values_mut() {
            table.finalize();
        }
        stats
    }
}
