// SQL Statement Performance by Table
//
// Executed statements are logged as a marker line carrying the duration,
// followed by the SQL text on the next lines. The aggregator rebuilds each
// statement, finds the tables it references and folds its timing into
// per-table statistics.

mod aggregator;
mod stats;
mod tables;

pub use aggregator::{QueryAggregator, QueryAnalysis, QueryExecution};
pub use stats::{TableStats, TableStatsTracker};
pub use tables::TableExtractor;
