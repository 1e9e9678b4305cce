//! Value validator: compares measurements against the reference chart.
//!
//! Every present code is judged on its own; there is no averaging and no
//! partial credit. A single failing code fails the run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use qc_ingest::partition_codes;
use qc_model::{
    MeasurementCode, MeasurementVerdict, ParsedMeasurements, RunIdentity, SizeCode, Status,
    ValidationReport, join_codes,
};
use qc_standards::{SizeChart, Standards};
use tracing::{debug, info};

/// Slack for float representation noise only, far below any real tolerance.
pub const FLOAT_EPSILON: f64 = 1e-9;

/// Pass rule: unrounded deviation at most the tolerance.
pub fn within_tolerance(deviation: f64, tolerance: f64) -> bool {
    deviation <= tolerance + FLOAT_EPSILON
}

/// Round to 2 decimal places for display.
pub fn round_display(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone)]
pub struct ValueValidator {
    standards: Arc<Standards>,
}

impl ValueValidator {
    pub fn new(standards: Arc<Standards>) -> Self {
        Self { standards }
    }

    pub fn standards(&self) -> &Standards {
        &self.standards
    }

    /// Validate parsed measurements for `size`, stamped with the current time.
    pub fn validate(
        &self,
        measurements: &ParsedMeasurements,
        size: &str,
        identity: &RunIdentity,
    ) -> ValidationReport {
        self.validate_at(measurements, size, identity, Utc::now())
    }

    pub fn validate_at(
        &self,
        measurements: &ParsedMeasurements,
        size: &str,
        identity: &RunIdentity,
        timestamp: DateTime<Utc>,
    ) -> ValidationReport {
        self.run(measurements, &[], size, identity, timestamp)
    }

    /// Validate a code/value map supplied from outside the parser.
    ///
    /// Keys outside the code set reject the run with an error message.
    pub fn validate_raw<I, K>(&self, raw: I, size: &str, identity: &RunIdentity) -> ValidationReport
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let (measurements, unknown) = partition_codes(raw);
        self.run(&measurements, &unknown, size, identity, Utc::now())
    }

    fn run(
        &self,
        measurements: &ParsedMeasurements,
        unknown: &[String],
        size: &str,
        identity: &RunIdentity,
        timestamp: DateTime<Utc>,
    ) -> ValidationReport {
        let mut report =
            ValidationReport::pending(size, timestamp, identity, self.standards.empty_summary());

        let chart = SizeCode::new(size)
            .ok()
            .and_then(|size| self.standards.size_chart(&size));
        let Some(chart) = chart else {
            report.error_messages.push(format!(
                "Invalid size '{size}'. Valid sizes: {}",
                self.standards.chart().valid_sizes_list()
            ));
            return report;
        };
        report.size = chart.size().as_str().to_string();

        let missing = measurements.missing_required();
        if !missing.is_empty() {
            report.error_messages.push(format!(
                "Missing required measurements: {}",
                join_codes(&missing)
            ));
            return report;
        }

        if !unknown.is_empty() {
            report.error_messages.push(format!(
                "Unknown measurement codes: {}",
                unknown.join(", ")
            ));
            return report;
        }

        self.compare(measurements, chart, &mut report);

        let passed = report.summary.failed_measurements == 0;
        report.success = passed;
        report.overall_result = Status::from_pass(passed);
        info!(
            size = %chart.size(),
            total = report.summary.total_measurements,
            passed = report.summary.passed_measurements,
            failed = report.summary.failed_measurements,
            "validated measurements"
        );
        report
    }

    fn compare(
        &self,
        measurements: &ParsedMeasurements,
        chart: &SizeChart,
        report: &mut ValidationReport,
    ) {
        let policy = self.standards.tolerances();
        for code in MeasurementCode::all().iter().copied() {
            let Some(measured) = measurements.get(code) else {
                continue;
            };
            let Some(standard) = chart.get(code) else {
                report.error_messages.push(format!(
                    "Standard value not found for code {code} in size {}",
                    chart.size()
                ));
                continue;
            };

            let deviation = (measured - standard).abs();
            let tolerance = policy.tolerance_for(code);
            let status = Status::from_pass(within_tolerance(deviation, tolerance));
            if status == Status::Fail {
                debug!(%code, deviation, tolerance, "measurement out of tolerance");
            }

            report.summary.record(status);
            report.measurements.push(MeasurementVerdict {
                code,
                measurement_name: code.name().to_string(),
                measured_value: measured,
                standard_value: standard,
                deviation: round_display(deviation),
                tolerance,
                status,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        assert!(within_tolerance(1.0, 1.0));
        assert!(within_tolerance((17.2f64 - 16.2).abs(), 1.0));
        assert!(!within_tolerance(1.01, 1.0));
        assert!(!within_tolerance(0.6, 0.5));
    }

    #[test]
    fn display_rounding() {
        assert_eq!(round_display(2.0), 2.0);
        assert_eq!(round_display(0.6000000000000014), 0.6);
        assert_eq!(round_display(1.005_1), 1.01);
    }
}
