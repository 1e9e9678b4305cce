//! Verdicts and run records produced by the value validator and the engine.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::code::MeasurementCode;
use crate::diagnostic::Diagnostic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn from_pass(passed: bool) -> Self {
        if passed { Status::Pass } else { Status::Fail }
    }

    pub fn is_pass(self) -> bool {
        self == Status::Pass
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one measured value against its standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementVerdict {
    pub code: MeasurementCode,
    pub measurement_name: String,
    pub measured_value: f64,
    pub standard_value: f64,
    /// Absolute deviation, rounded to 2 decimal places for display.
    pub deviation: f64,
    pub tolerance: f64,
    pub status: Status,
}

/// Counts for one run plus the tolerance policy that was in force.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_measurements: usize,
    pub passed_measurements: usize,
    pub failed_measurements: usize,
    pub tolerance_default: f64,
    pub tolerance_special: BTreeMap<MeasurementCode, f64>,
}

impl Summary {
    pub fn new(tolerance_default: f64, tolerance_special: BTreeMap<MeasurementCode, f64>) -> Self {
        Self {
            total_measurements: 0,
            passed_measurements: 0,
            failed_measurements: 0,
            tolerance_default,
            tolerance_special,
        }
    }

    pub fn record(&mut self, status: Status) {
        self.total_measurements += 1;
        match status {
            Status::Pass => self.passed_measurements += 1,
            Status::Fail => self.failed_measurements += 1,
        }
    }
}

/// Operator and session identifiers supplied by the caller. Never checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunIdentity {
    pub operator_id: Option<String>,
    pub session_id: Option<String>,
}

impl RunIdentity {
    pub fn new(operator_id: Option<String>, session_id: Option<String>) -> Self {
        Self {
            operator_id,
            session_id,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

/// Output of the value validator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub size: String,
    pub timestamp: DateTime<Utc>,
    pub operator_id: Option<String>,
    pub session_id: Option<String>,
    pub measurements: Vec<MeasurementVerdict>,
    pub overall_result: Status,
    pub error_messages: Vec<String>,
    pub summary: Summary,
}

impl ValidationReport {
    /// A failing report with no verdicts yet.
    pub fn pending(
        size: impl Into<String>,
        timestamp: DateTime<Utc>,
        identity: &RunIdentity,
        summary: Summary,
    ) -> Self {
        Self {
            success: false,
            size: size.into(),
            timestamp,
            operator_id: identity.operator_id.clone(),
            session_id: identity.session_id.clone(),
            measurements: Vec::new(),
            overall_result: Status::Fail,
            error_messages: Vec::new(),
            summary,
        }
    }
}

/// Output of the validation engine: the value report plus parse outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub success: bool,
    pub size: String,
    pub timestamp: DateTime<Utc>,
    pub operator_id: Option<String>,
    pub session_id: Option<String>,
    pub file_parsed: bool,
    pub validation_passed: bool,
    pub parse_errors: Vec<Diagnostic>,
    pub validation_errors: Vec<String>,
    pub measurements: Vec<MeasurementVerdict>,
    pub overall_result: Status,
    pub summary: Summary,
}

impl ValidationResult {
    /// A run that stopped before value validation.
    pub fn unparsed(
        size: impl Into<String>,
        timestamp: DateTime<Utc>,
        identity: &RunIdentity,
        parse_errors: Vec<Diagnostic>,
        summary: Summary,
    ) -> Self {
        Self {
            success: false,
            size: size.into(),
            timestamp,
            operator_id: identity.operator_id.clone(),
            session_id: identity.session_id.clone(),
            file_parsed: false,
            validation_passed: false,
            parse_errors,
            validation_errors: Vec::new(),
            measurements: Vec::new(),
            overall_result: Status::Fail,
            summary,
        }
    }

    /// Merge a value report into a parsed run.
    pub fn from_report(report: ValidationReport, parse_errors: Vec<Diagnostic>) -> Self {
        Self {
            success: report.success,
            size: report.size,
            timestamp: report.timestamp,
            operator_id: report.operator_id,
            session_id: report.session_id,
            file_parsed: true,
            validation_passed: report.success,
            parse_errors,
            validation_errors: report.error_messages,
            measurements: report.measurements,
            overall_result: report.overall_result,
            summary: report.summary,
        }
    }

    pub fn passed(&self) -> bool {
        self.overall_result.is_pass()
    }

    pub fn verdict(&self, code: MeasurementCode) -> Option<&MeasurementVerdict> {
        self.measurements.iter().find(|verdict| verdict.code == code)
    }

    /// Every message recorded for the run, parse errors first.
    pub fn messages(&self) -> Vec<String> {
        self.parse_errors
            .iter()
            .map(Diagnostic::message)
            .chain(self.validation_errors.iter().cloned())
            .collect()
    }
}
