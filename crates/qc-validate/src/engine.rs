//! Validation engine: parse, check structure, then validate values.
//!
//! Data problems never surface as `Err`: they end up as diagnostics or
//! error messages on the returned [`ValidationResult`].

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use qc_ingest::{TextSource, check_structure, parse_source};
use qc_model::{RunIdentity, SizeCode, ValidationResult};
use qc_standards::{SizeChart, Standards, StandardsError};
use tracing::{info, warn};

use crate::validator::ValueValidator;

/// Entry point for validation runs. Cheap to clone and safe to share
/// across threads; reference data is read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    validator: ValueValidator,
}

impl ValidationEngine {
    pub fn new(standards: Standards) -> Self {
        Self::from_shared(Arc::new(standards))
    }

    pub fn from_shared(standards: Arc<Standards>) -> Self {
        Self {
            validator: ValueValidator::new(standards),
        }
    }

    /// Engine over the embedded sweatshirt chart and default tolerances.
    pub fn embedded() -> Result<Self, StandardsError> {
        Ok(Self::new(Standards::embedded()?))
    }

    pub fn standards(&self) -> &Standards {
        self.validator.standards()
    }

    pub fn validator(&self) -> &ValueValidator {
        &self.validator
    }

    pub fn validate_source(
        &self,
        source: TextSource<'_>,
        size: &str,
        identity: &RunIdentity,
    ) -> ValidationResult {
        self.validate_source_at(source, size, identity, Utc::now())
    }

    /// Run the full pipeline with a caller-supplied timestamp.
    pub fn validate_source_at(
        &self,
        source: TextSource<'_>,
        size: &str,
        identity: &RunIdentity,
        timestamp: DateTime<Utc>,
    ) -> ValidationResult {
        let outcome = parse_source(source);
        let unreadable = outcome.has_blocking() && outcome.measurements.is_empty();
        let mut parse_errors = outcome.diagnostics;

        if unreadable {
            warn!(source = %source.describe(), "source could not be parsed");
            return ValidationResult::unparsed(
                size,
                timestamp,
                identity,
                parse_errors,
                self.standards().empty_summary(),
            );
        }

        let structural = check_structure(&outcome.measurements);
        if !structural.is_empty() {
            parse_errors.extend(structural);
            warn!(
                source = %source.describe(),
                errors = parse_errors.len(),
                "measurement file is incomplete"
            );
            return ValidationResult::unparsed(
                size,
                timestamp,
                identity,
                parse_errors,
                self.standards().empty_summary(),
            );
        }

        let report = self
            .validator
            .validate_at(&outcome.measurements, size, identity, timestamp);
        let result = ValidationResult::from_report(report, parse_errors);
        if result.passed() {
            info!(size, "measurement run passed");
        } else {
            warn!(
                size,
                failed = result.summary.failed_measurements,
                errors = result.validation_errors.len(),
                "measurement run failed"
            );
        }
        result
    }

    pub fn validate_file(&self, path: &Path, size: &str, identity: &RunIdentity) -> ValidationResult {
        self.validate_source(TextSource::Path(path), size, identity)
    }

    pub fn validate_text(&self, text: &str, size: &str, identity: &RunIdentity) -> ValidationResult {
        self.validate_source(TextSource::Text(text), size, identity)
    }

    /// Known sizes in natural order.
    pub fn list_sizes(&self) -> Vec<SizeCode> {
        self.standards().chart().sizes()
    }

    pub fn get_chart(&self, size: &str) -> Option<&SizeChart> {
        self.standards().chart().get_label(size)
    }
}
