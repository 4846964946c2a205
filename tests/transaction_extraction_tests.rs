// Request section extraction through the public API

use loglens::{Analyzer, LensError};

const LOG: &str = "\
[2024-01-01T00:00:00.000][INF] startup
===BEGIN REQUEST===
R1
POST /orders {\"id\": 1}
===END REQUEST===
R1
===BEGIN REQUEST===
R2
GET /customers
===END REQUEST===
R2
[2024-01-01T00:00:05.000][INF] retry
===BEGIN REQUEST===
R1
POST /orders {\"id\": 1} (retry)
===END REQUEST===
R1
";

fn analyzer() -> Analyzer {
    Analyzer::with_defaults().unwrap()
}

#[test]
fn test_scenario_single_request() {
    let text = "===BEGIN REQUEST===\nR1\nA\n===END REQUEST===\nR1";
    let extracted = analyzer().extract_transaction(text, "R1").unwrap();
    assert_eq!(extracted, text);
}

#[test]
fn test_all_sections_in_order() {
    let section = analyzer().transaction_sections(LOG, "R1").unwrap();

    assert_eq!(section.sections, 2);
    let first = section.text.find("POST /orders {\"id\": 1}\n").unwrap();
    let retry = section.text.find("(retry)").unwrap();
    assert!(first < retry);
    assert!(section.text.contains("===END REQUEST===\nR1\n\n===BEGIN REQUEST===\nR1"));
    assert!(!section.text.contains("GET /customers"));
    assert!(!section.text.contains("startup"));
}

#[test]
fn test_result_is_trimmed() {
    let text = "\n\n===BEGIN REQUEST===\nR2\nbody\n===END REQUEST===\nR2\n\n";
    let extracted = analyzer().extract_transaction(text, "R2").unwrap();
    assert!(extracted.starts_with("===BEGIN"));
    assert!(extracted.ends_with("R2"));
}

#[test]
fn test_unknown_id_returns_empty() {
    let extracted = analyzer().extract_transaction(LOG, "R3").unwrap();
    assert!(extracted.is_empty());
}

#[test]
fn test_regex_metacharacters_in_id() {
    let text = "===BEGIN REQUEST===\n(a+)\nX\n===END REQUEST===\n(a+)\n===BEGIN REQUEST===\naa\nY\n===END REQUEST===\naa";
    let extracted = analyzer().extract_transaction(text, "(a+)").unwrap();

    assert!(extracted.contains('X'));
    assert!(!extracted.contains('Y'));
}

#[test]
fn test_id_does_not_match_longer_id() {
    let text = "===BEGIN REQUEST===\nR10\nOTHER\n===END REQUEST===\nR10";
    let extracted = analyzer().extract_transaction(text, "R1").unwrap();
    assert!(extracted.is_empty());
}

#[test]
fn test_id_selects_only_its_own_section_among_prefixed_ids() {
    let text = "\
===BEGIN REQUEST===
R10
OTHER
===END REQUEST===
R10
===BEGIN REQUEST===
R1
MINE
===END REQUEST===
R1";
    let extracted = analyzer().extract_transaction(text, "R1").unwrap();
    assert_eq!(extracted, "===BEGIN REQUEST===\nR1\nMINE\n===END REQUEST===\nR1");
}

#[test]
fn test_empty_id_is_contract_violation() {
    assert!(matches!(
        analyzer().extract_transaction(LOG, ""),
        Err(LensError::EmptyRequestId)
    ));
}

#[test]
fn test_idempotent() {
    let analyzer = analyzer();
    assert_eq!(
        analyzer.transaction_sections(LOG, "R1").unwrap(),
        analyzer.transaction_sections(LOG, "R1").unwrap()
    );
}
