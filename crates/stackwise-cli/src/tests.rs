//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use stackwise_core::EngineConfig;
use tempfile::NamedTempFile;

use crate::commands::{self, truncate, NewSupplement};

fn snapshot_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

fn sample_snapshot() -> NamedTempFile {
    snapshot_file(
        r#"{
            "userId": "u1",
            "journalHistory": [
                {"date": "2026-03-01", "sleep": 8, "energy": 8, "focus": 7, "mood": 7},
                {"date": "2026-03-02", "sleep": 5, "energy": 5, "focus": 6, "mood": 6}
            ],
            "checkInHistory": [
                {"supplementId": "zinc", "supplementName": "Zinc",
                 "checkedAt": "2026-03-01T20:00:00Z", "time": "evening"}
            ],
            "currentStack": [
                {"supplementId": "zinc", "supplementName": "Zinc", "dosage": "25mg", "time": "evening"},
                {"supplementId": "caffeine", "supplementName": "Coffee", "time": "bedtime"}
            ]
        }"#,
    )
}

// ========== Shared Utility Tests ==========

#[test]
fn test_load_snapshot() {
    let file = sample_snapshot();
    let snapshot = commands::load_snapshot(file.path()).unwrap();
    assert_eq!(snapshot.user_id.as_deref(), Some("u1"));
    assert_eq!(snapshot.journal_history.len(), 2);
    assert_eq!(snapshot.current_stack.len(), 2);
}

#[test]
fn test_load_snapshot_missing_file() {
    let err = commands::load_snapshot(std::path::Path::new("/nonexistent/snapshot.json"))
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read snapshot"));
}

#[test]
fn test_load_snapshot_invalid_json() {
    let file = snapshot_file("{ not json");
    let err = commands::load_snapshot(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid snapshot JSON"));
}

#[test]
fn test_load_snapshot_out_of_scale_score() {
    let file = snapshot_file(
        r#"{"journalHistory": [
            {"date": "2026-03-01", "sleep": 8, "energy": 11, "focus": 7, "mood": 7}
        ]}"#,
    );
    let err = commands::load_snapshot(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("expected 0-10"));
}

#[test]
fn test_empty_object_is_a_valid_snapshot() {
    let file = snapshot_file("{}");
    let snapshot = commands::load_snapshot(file.path()).unwrap();
    assert!(snapshot.current_stack.is_empty());
}

#[test]
fn test_load_config_explicit_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[warnings]\nmax_stack_size = 5").unwrap();

    let config = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.warnings.max_stack_size, 5);
    assert_eq!(config.readiness.min_journal_days, 7);
}

#[test]
fn test_load_config_missing_explicit_path_fails() {
    let result = commands::load_config(Some(std::path::Path::new("/nonexistent/engine.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_config_invalid_toml_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[warnings\nmax_stack_size = ").unwrap();
    assert!(commands::load_config(Some(file.path())).is_err());
}

// ========== Recommendation Command Tests ==========

#[test]
fn test_cmd_recommend() {
    let file = sample_snapshot();
    let result = commands::cmd_recommend(file.path(), EngineConfig::default(), None, None, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_recommend_json_top_and_type() {
    let file = sample_snapshot();
    let result = commands::cmd_recommend(
        file.path(),
        EngineConfig::default(),
        Some(2),
        Some("warning"),
        true,
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_recommend_unknown_type() {
    let file = sample_snapshot();
    let result = commands::cmd_recommend(
        file.path(),
        EngineConfig::default(),
        None,
        Some("astrology"),
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_summary() {
    let file = sample_snapshot();
    assert!(commands::cmd_summary(file.path(), EngineConfig::default()).is_ok());
}

// ========== Diagnostic Command Tests ==========

#[test]
fn test_cmd_analyze() {
    let file = sample_snapshot();
    assert!(commands::cmd_analyze(file.path(), EngineConfig::default()).is_ok());
}

#[test]
fn test_cmd_readiness() {
    let file = sample_snapshot();
    assert!(commands::cmd_readiness(file.path(), EngineConfig::default(), false).is_ok());
    assert!(commands::cmd_readiness(file.path(), EngineConfig::default(), true).is_ok());
}

// ========== Check Command Tests ==========

#[test]
fn test_new_supplement_to_stack_item() {
    let candidate = NewSupplement {
        id: "iron",
        name: Some("Iron Bisglycinate"),
        dosage: Some("18mg"),
        time: Some("morning"),
    };
    let item = candidate.to_stack_item().unwrap();
    assert_eq!(item.supplement_id, "iron");
    assert_eq!(item.supplement_name, "Iron Bisglycinate");
    assert_eq!(item.dosage.as_deref(), Some("18mg"));
}

#[test]
fn test_new_supplement_invalid_time() {
    let candidate = NewSupplement {
        id: "iron",
        name: None,
        dosage: None,
        time: Some("teatime"),
    };
    assert!(candidate.to_stack_item().is_err());
}

#[test]
fn test_cmd_check() {
    let file = sample_snapshot();
    let candidate = NewSupplement {
        id: "iron",
        name: None,
        dosage: None,
        time: None,
    };
    assert!(commands::cmd_check(file.path(), EngineConfig::default(), &candidate, false).is_ok());
    assert!(commands::cmd_check(file.path(), EngineConfig::default(), &candidate, true).is_ok());
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config() {
    assert!(commands::cmd_config(&EngineConfig::default()).is_ok());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a much longer title", 10), "a much ...");
    assert_eq!(truncate("Kurkuma + Piperin", 17), "Kurkuma + Piperin");
}
