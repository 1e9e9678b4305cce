//! End-to-end validation runs through the engine.

use std::fmt::Write as _;
use std::fs;

use chrono::{TimeZone, Utc};
use qc_ingest::TextSource;
use qc_model::{MeasurementCode, RunIdentity, Status};
use qc_validate::ValidationEngine;

fn engine() -> ValidationEngine {
    ValidationEngine::embedded().expect("load embedded standards")
}

/// Measurement text with every required code at its standard value.
fn standard_text(engine: &ValidationEngine, size: &str, overrides: &[(MeasurementCode, f64)]) -> String {
    let chart = engine.get_chart(size).expect("known size");
    let mut text = String::new();
    for code in MeasurementCode::required() {
        let value = overrides
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, v)| *v)
            .or_else(|| chart.get(*code))
            .expect("standard value");
        writeln!(text, "{code}: {value}").expect("write line");
    }
    text
}

fn identity() -> RunIdentity {
    RunIdentity::new(Some("operator-12".to_string()), Some("session-abc".to_string()))
}

#[test]
fn size_label_is_stored_trimmed() {
    let engine = engine();
    let result = engine.validate_text(&standard_text(&engine, "6/7", &[]), " 6/7 ", &identity());

    assert_eq!(result.overall_result, Status::Pass);
    assert_eq!(result.size, "6/7");
}

#[test]
fn standard_values_pass() {
    let engine = engine();
    let result = engine.validate_text(&standard_text(&engine, "6/7", &[]), "6/7", &identity());

    assert!(result.file_parsed);
    assert!(result.validation_passed);
    assert!(result.success);
    assert_eq!(result.overall_result, Status::Pass);
    assert_eq!(result.summary.total_measurements, 20);
    assert_eq!(result.summary.failed_measurements, 0);
    assert!(result.parse_errors.is_empty());
    assert!(result.validation_errors.is_empty());
    assert_eq!(result.operator_id.as_deref(), Some("operator-12"));
    assert_eq!(result.session_id.as_deref(), Some("session-abc"));
}

#[test]
fn chest_width_out_of_tolerance_fails() {
    let engine = engine();
    let text = standard_text(&engine, "6/7", &[(MeasurementCode::B, 46.0)]);
    let result = engine.validate_text(&text, "6/7", &identity());

    assert!(result.file_parsed);
    assert!(!result.validation_passed);
    assert_eq!(result.overall_result, Status::Fail);
    let chest = result.verdict(MeasurementCode::B).expect("B verdict");
    assert_eq!(chest.status, Status::Fail);
    assert_eq!(chest.deviation, 2.0);
    assert_eq!(chest.standard_value, 44.0);
    assert_eq!(chest.tolerance, 1.0);
    assert_eq!(result.summary.failed_measurements, 1);
    assert_eq!(result.summary.passed_measurements, 19);
}

#[test]
fn neck_width_uses_the_special_tolerance() {
    let engine = engine();
    let text = standard_text(&engine, "6/7", &[(MeasurementCode::H, 16.8)]);
    let result = engine.validate_text(&text, "6/7", &identity());

    let neck = result.verdict(MeasurementCode::H).expect("H verdict");
    assert_eq!(neck.status, Status::Fail);
    assert_eq!(neck.tolerance, 0.5);
    assert_eq!(neck.deviation, 0.6);
    assert_eq!(neck.measurement_name, "Neck Width (Seam to Seam)");

    // the same deviation passes anywhere the default tolerance applies
    let text = standard_text(&engine, "6/7", &[(MeasurementCode::A, 50.7)]);
    let result = engine.validate_text(&text, "6/7", &identity());
    assert_eq!(result.overall_result, Status::Pass);
}

#[test]
fn complete_workflow_for_size_8_9() {
    let engine = engine();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("sweatshirt_8-9.txt");
    let mut text = String::from("# QC sheet, line 3\n\n");
    text.push_str("Length from shoulder (A): 56.5\n");
    text.push_str("B = 49.2\n");
    text.push_str("C: 44.0 cm\n");
    text.push_str("Bottom width (D): 46.5\n");
    text.push_str("E: 40.7x 2\n");
    for (code, value) in [
        ("F", 47.0),
        ("G", 43.5),
        ("H", 18.7),
        ("I", 44.7),
        ("J", 20.5),
        ("K", 12.7),
        ("L", 8.0),
        ("M", 6.2),
        ("N", 23.0),
        ("O", 2.2),
        ("P", 5.8),
        ("Q", 2.0),
        ("R", 5.2),
        ("S", 5.0),
        ("T", 3.0),
        ("PRINT_PLACEMENT_FROM_CF", 7.3),
    ] {
        writeln!(text, "{code}: {value}").expect("write line");
    }
    text.push_str("operator remarks: none\n");
    fs::write(&path, &text).expect("write fixture");

    let timestamp = Utc.with_ymd_and_hms(2025, 1, 15, 8, 0, 0).unwrap();
    let result = engine.validate_source_at(TextSource::Path(&path), "8/9", &identity(), timestamp);

    assert!(result.file_parsed);
    assert_eq!(result.overall_result, Status::Pass);
    assert_eq!(result.summary.total_measurements, 21);
    assert_eq!(result.timestamp, timestamp);
    assert_eq!(
        result.parse_errors.iter().map(|d| d.message()).collect::<Vec<_>>(),
        vec!["Line 24: Could not parse line format: 'operator remarks: none'".to_string()]
    );
    let codes: Vec<MeasurementCode> = result.measurements.iter().map(|v| v.code).collect();
    assert_eq!(codes, MeasurementCode::all());
    assert_eq!(
        result.verdict(MeasurementCode::H).map(|v| v.deviation),
        Some(0.4)
    );
}

#[test]
fn missing_code_is_a_parse_failure() {
    let engine = engine();
    let text: String = standard_text(&engine, "7/8", &[])
        .lines()
        .filter(|line| !line.starts_with("K:"))
        .map(|line| format!("{line}\n"))
        .collect();
    let result = engine.validate_text(&text, "7/8", &identity());

    assert!(!result.file_parsed);
    assert!(!result.validation_passed);
    assert_eq!(result.overall_result, Status::Fail);
    assert!(result.measurements.is_empty());
    assert_eq!(
        result.messages(),
        vec!["Missing required measurement(s): K".to_string()]
    );
    assert_eq!(result.summary.total_measurements, 0);
    assert_eq!(result.summary.tolerance_default, 1.0);
}

#[test]
fn bad_lines_are_reported_alongside_missing_codes() {
    let engine = engine();
    let text = standard_text(&engine, "6/7", &[])
        .replace("B: 44\n", "B: not_a_number\n")
        .replace("D: 42\n", "D: -5.0\n");
    let result = engine.validate_text(&text, "6/7", &identity());

    assert!(!result.file_parsed);
    assert_eq!(
        result.messages(),
        vec![
            "Line 2: Invalid numeric value 'not_a_number' for code B".to_string(),
            "Line 4: Measurement D must be positive, got -5.0".to_string(),
            "Missing required measurement(s): B, D".to_string(),
        ]
    );
}

#[test]
fn empty_file_short_circuits() {
    let engine = engine();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").expect("write fixture");

    let result = engine.validate_file(&path, "6/7", &RunIdentity::anonymous());
    assert!(!result.file_parsed);
    assert_eq!(result.messages(), vec!["Error: File is empty".to_string()]);
    assert!(result.operator_id.is_none());
}

#[test]
fn unknown_size_is_a_validation_error() {
    let engine = engine();
    let result = engine.validate_text(&standard_text(&engine, "6/7", &[]), "15/16", &identity());

    assert!(result.file_parsed);
    assert!(!result.validation_passed);
    assert_eq!(result.overall_result, Status::Fail);
    assert!(result.measurements.is_empty());
    assert_eq!(
        result.validation_errors,
        vec!["Invalid size '15/16'. Valid sizes: 6/7, 7/8, 8/9, 9/10, 11/12, 13/14".to_string()]
    );
}

#[test]
fn repeated_runs_differ_only_in_timestamp() {
    let engine = engine();
    let text = standard_text(&engine, "9/10", &[(MeasurementCode::J, 22.0)]);
    let first = engine.validate_text(&text, "9/10", &identity());
    let mut second = engine.validate_text(&text, "9/10", &identity());
    second.timestamp = first.timestamp;
    assert_eq!(first, second);
}

#[test]
fn serialized_result_uses_wire_field_names() {
    let engine = engine();
    let text = standard_text(&engine, "6/7", &[(MeasurementCode::B, 46.0)]);
    let result = engine.validate_text(&text, "6/7", &identity());
    let json = serde_json::to_value(&result).expect("serialize result");

    for field in [
        "success",
        "size",
        "timestamp",
        "operator_id",
        "session_id",
        "file_parsed",
        "validation_passed",
        "parse_errors",
        "validation_errors",
        "measurements",
        "overall_result",
        "summary",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(json["overall_result"], "FAIL");
    assert_eq!(json["measurements"][1]["code"], "B");
    assert_eq!(json["measurements"][1]["status"], "FAIL");
    assert_eq!(json["summary"]["failed_measurements"], 1);
}
