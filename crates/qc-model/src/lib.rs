pub mod code;
pub mod diagnostic;
pub mod error;
pub mod measurements;
pub mod size;
pub mod verdict;

pub use code::{MeasurementCode, join_codes};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSeverity};
pub use error::{ModelError, Result};
pub use measurements::ParsedMeasurements;
pub use size::SizeCode;
pub use verdict::{
    MeasurementVerdict, RunIdentity, Status, Summary, ValidationReport, ValidationResult,
};

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn summary() -> Summary {
        Summary::new(1.0, BTreeMap::from([(MeasurementCode::H, 0.5)]))
    }

    #[test]
    fn summary_counts() {
        let mut summary = summary();
        summary.record(Status::Pass);
        summary.record(Status::Fail);
        summary.record(Status::Pass);
        assert_eq!(summary.total_measurements, 3);
        assert_eq!(summary.passed_measurements, 2);
        assert_eq!(summary.failed_measurements, 1);
    }

    #[test]
    fn unparsed_result_serializes() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let result = ValidationResult::unparsed(
            "8/9",
            timestamp,
            &RunIdentity::new(Some("op-7".to_string()), None),
            vec![Diagnostic::file_level(DiagnosticKind::EmptySource)],
            summary(),
        );
        let json = serde_json::to_value(&result).expect("serialize result");
        assert_eq!(json["file_parsed"], false);
        assert_eq!(json["overall_result"], "FAIL");
        assert_eq!(json["parse_errors"][0], "Error: File is empty");
        assert_eq!(json["timestamp"], "2024-05-01T09:30:00Z");
        assert_eq!(json["summary"]["tolerance_special"]["H"], 0.5);
        assert!(json["session_id"].is_null());
    }
}
