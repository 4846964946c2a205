#![no_main]

use libfuzzer_sys::fuzz_target;
use loglens::Analyzer;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let Ok(analyzer) = Analyzer::with_defaults() else {
        return;
    };

    // None of the entry points may panic, whatever the input
    let groups = analyzer.analyze_errors(&text);
    let members: usize = groups.iter().map(|g| g.count).sum();
    assert_eq!(members, analyzer.error_entries(&text).len());

    let analysis = analyzer.analyze_queries(&text, Some(0.0));
    for stats in analysis.tables.values() {
        assert_eq!(stats.count, stats.queries.len());
    }

    let request_id = text.lines().nth(1).unwrap_or("R1");
    let _ = analyzer.extract_transaction(&text, request_id);
});
