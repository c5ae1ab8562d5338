//! Tests for aggregated validation and round-trip fidelity.

use marketdata_config::{ConfigError, Settings, ValidationReport};

const VALID_DOCUMENT: &str = r#"
database:
  development:
    host: localhost
    port: 5432
    database: market_data_dev
    username: market_user
    password: hunter2
    pool_size: 20
    max_overflow: 30

timescale:
  chunk_time_interval: "30 minutes"
  compression_after: "2 hours"
  compression_policy: "lz4"
  retention_policy: "7 days"

symbols:
  development: [AAPL, GOOGL, MSFT, TSLA, AMZN, META, NVDA, NFLX, SPY, QQQ]
  batch_size: 5000
  flush_interval: 2
  max_queue_size: 50000

performance:
  connection_pool_size: 25
  statement_timeout: 30000
  query_timeout: 10000
  batch_insert_size: 1000
"#;

fn expect_report(document: &str) -> ValidationReport {
    match Settings::from_yaml_str(document) {
        Err(ConfigError::Validation(report)) => report,
        other => panic!("expected a validation failure, got {other:?}"),
    }
}

/// A loaded document survives re-serialization with every value intact.
#[test]
fn test_round_trip_preserves_all_field_values() {
    let settings = Settings::from_yaml_str(VALID_DOCUMENT).unwrap();

    let value = serde_json::to_value(&settings).unwrap();
    let back: Settings = serde_json::from_value(value).unwrap();

    assert_eq!(back, settings);
}

/// Duration fields keep their original spelling on re-serialization.
#[test]
fn test_round_trip_keeps_interval_spellings() {
    let settings = Settings::from_yaml_str(VALID_DOCUMENT).unwrap();
    let value = serde_json::to_value(&settings).unwrap();

    assert_eq!(value["timescale"]["chunk_time_interval"], "30 minutes");
    assert_eq!(value["timescale"]["compression_after"], "2 hours");
    assert_eq!(value["timescale"]["retention_policy"], "7 days");
}

/// The flattened symbol watchlists re-serialize next to the batching knobs.
#[test]
fn test_round_trip_keeps_watchlists_in_place() {
    let settings = Settings::from_yaml_str(VALID_DOCUMENT).unwrap();
    let value = serde_json::to_value(&settings).unwrap();

    assert_eq!(value["symbols"]["development"][0], "AAPL");
    assert_eq!(value["symbols"]["batch_size"], 5000);
}

/// A missing required key fails validation and names that key.
#[test]
fn test_missing_host_is_named() {
    let document = VALID_DOCUMENT.replace("    host: localhost\n", "");
    let report = expect_report(&document);
    assert!(
        report.names("database.development.host"),
        "report was: {report}"
    );
}

/// A document with no password anywhere cannot start the pipeline.
#[test]
fn test_missing_password_is_named() {
    let document = VALID_DOCUMENT.replace("    password: hunter2\n", "");
    let report = expect_report(&document);
    assert!(report.names("database.development.password"));
}

/// Retention is never defaulted; omitting it is a named failure.
#[test]
fn test_missing_retention_policy_is_named() {
    let document = VALID_DOCUMENT.replace("  retention_policy: \"7 days\"\n", "");
    let report = expect_report(&document);
    assert!(report.names("timescale.retention_policy"));
}

/// Non-positive pool and batch sizes fail validation.
#[test]
fn test_non_positive_sizes_are_rejected() {
    let document = VALID_DOCUMENT
        .replace("pool_size: 20", "pool_size: 0")
        .replace("batch_size: 5000", "batch_size: 0");

    let report = expect_report(&document);
    assert!(report.names("database.development.pool_size"));
    assert!(report.names("symbols.batch_size"));
}

/// A zero flush interval fails validation.
#[test]
fn test_zero_flush_interval_is_rejected() {
    let document = VALID_DOCUMENT.replace("flush_interval: 2", "flush_interval: 0");
    let report = expect_report(&document);
    assert!(report.names("symbols.flush_interval"));
}

/// A duplicate ticker fails validation and names the duplicate.
#[test]
fn test_duplicate_symbol_is_rejected() {
    let document = VALID_DOCUMENT.replace("SPY, QQQ]", "SPY, AAPL]");
    let report = expect_report(&document);

    assert!(report.names("symbols.development[9]"));
    assert!(report
        .issues()
        .iter()
        .any(|issue| issue.message.contains("duplicate symbol `AAPL`")));
}

/// Every problem in a broken document is reported at once.
#[test]
fn test_all_problems_are_aggregated() {
    let document = VALID_DOCUMENT
        .replace("    host: localhost\n", "")
        .replace("pool_size: 20", "pool_size: 0")
        .replace("query_timeout: 10000", "query_timeout: 0")
        .replace("SPY, QQQ]", "SPY, AAPL]");

    let report = expect_report(&document);

    assert!(report.names("database.development.host"));
    assert!(report.names("database.development.pool_size"));
    assert!(report.names("performance.query_timeout"));
    assert!(report.names("symbols.development[9]"));
    assert!(report.issues().len() >= 4, "report was: {report}");
}

/// A zero-length duration string fails validation as non-positive.
#[test]
fn test_zero_duration_is_rejected() {
    let document = VALID_DOCUMENT.replace("\"30 minutes\"", "\"0 minutes\"");
    let report = expect_report(&document);
    assert!(report.names("timescale.chunk_time_interval"));
}

/// An unparseable duration string is a load error, named by serde.
#[test]
fn test_unparseable_duration_is_a_load_error() {
    let document = VALID_DOCUMENT.replace("\"30 minutes\"", "\"soon\"");
    match Settings::from_yaml_str(&document) {
        Err(ConfigError::Deserialization(_)) => {}
        other => panic!("expected a deserialization error, got {other:?}"),
    }
}

/// An unknown compression codec is rejected at parse time.
#[test]
fn test_unknown_compression_codec_is_rejected() {
    let document = VALID_DOCUMENT.replace("\"lz4\"", "\"brotli\"");
    assert!(matches!(
        Settings::from_yaml_str(&document),
        Err(ConfigError::Deserialization(_))
    ));
}

/// A document with no database section at all reports the section.
#[test]
fn test_empty_document_reports_required_sections() {
    let report = expect_report("performance:\n  connection_pool_size: 25\n");
    assert!(report.names("database"));
    assert!(report.names("symbols"));
    assert!(report.names("timescale.retention_policy"));
}
