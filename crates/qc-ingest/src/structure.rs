//! Structural checks on parsed measurements.

use std::collections::BTreeSet;

use qc_model::{Diagnostic, DiagnosticKind, MeasurementCode, ParsedMeasurements};
use tracing::debug;

/// One blocking diagnostic naming every missing required code, if any.
pub fn check_structure(measurements: &ParsedMeasurements) -> Vec<Diagnostic> {
    let missing = measurements.missing_required();
    if missing.is_empty() {
        return Vec::new();
    }
    debug!(missing = missing.len(), "required measurements missing");
    vec![Diagnostic::file_level(DiagnosticKind::MissingRequired {
        codes: missing,
    })]
}

/// Split a raw code/value map into known measurements and unknown keys.
///
/// Keys match case-insensitively. Unknown keys come back trimmed, sorted and
/// deduplicated. When two keys canonicalize to the same code the first wins.
pub fn partition_codes<I, K>(raw: I) -> (ParsedMeasurements, Vec<String>)
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let mut measurements = ParsedMeasurements::new();
    let mut unknown = BTreeSet::new();
    for (key, value) in raw {
        let key = key.as_ref();
        match MeasurementCode::parse(key) {
            Some(code) => {
                measurements.insert(code, value);
            }
            None => {
                unknown.insert(key.trim().to_string());
            }
        }
    }
    (measurements, unknown.into_iter().collect())
}

/// Boundary check for maps supplied from outside the parser.
pub fn canonicalize_codes<I, K>(raw: I) -> Result<ParsedMeasurements, Vec<Diagnostic>>
where
    I: IntoIterator<Item = (K, f64)>,
    K: AsRef<str>,
{
    let (measurements, unknown) = partition_codes(raw);
    if unknown.is_empty() {
        Ok(measurements)
    } else {
        Err(vec![Diagnostic::file_level(DiagnosticKind::InvalidCodes {
            codes: unknown,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ParsedMeasurements {
        MeasurementCode::required()
            .iter()
            .map(|code| (*code, 10.0))
            .collect()
    }

    #[test]
    fn complete_measurements_pass() {
        assert!(check_structure(&complete()).is_empty());
    }

    #[test]
    fn names_exactly_the_missing_codes() {
        let measurements: ParsedMeasurements = complete()
            .iter()
            .filter(|(code, _)| !matches!(code, MeasurementCode::C | MeasurementCode::Q))
            .collect();
        let diagnostics = check_structure(&measurements);
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_blocking());
        assert_eq!(
            diagnostics[0].message(),
            "Missing required measurement(s): C, Q"
        );
    }

    #[test]
    fn unknown_keys_are_reported_sorted() {
        let raw = vec![("a", 1.0), ("ZZ", 2.0), ("Y", 3.0), ("ZZ", 4.0)];
        let diagnostics = canonicalize_codes(raw).unwrap_err();
        assert_eq!(
            diagnostics[0].message(),
            "Invalid measurement code(s): Y, ZZ"
        );
    }

    #[test]
    fn known_keys_are_canonicalized() {
        let raw = vec![("a".to_string(), 1.0), ("A".to_string(), 2.0)];
        let measurements = canonicalize_codes(raw).unwrap();
        assert_eq!(measurements.get(MeasurementCode::A), Some(1.0));
        assert_eq!(measurements.len(), 1);
    }
}
