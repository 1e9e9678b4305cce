//! Parse and structure diagnostics.
//!
//! A diagnostic is data, never an error value: the parser and the structural
//! checks accumulate them in source-line order and the engine decides from
//! their severity whether value validation may run.

use std::fmt;

use serde::Serialize;

use crate::code::{MeasurementCode, join_codes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// Stops the pipeline before value validation.
    Blocking,
    /// Recorded for the operator; the rest of the source is still used.
    Informational,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    // Source level
    /// The source could not be read at all.
    Unreadable { reason: String },
    /// The source bytes are not valid UTF-8.
    NotUtf8,
    /// The source has no content.
    EmptySource,

    // Line level
    /// A code-shaped token that is not part of the closed code set.
    UnknownCode { code: String },
    /// The value token is not a plain decimal number.
    InvalidNumber { code: MeasurementCode, value: String },
    /// The value parsed but is zero or negative.
    NonPositive { code: MeasurementCode, value: String },
    /// The code was already recorded earlier in the same source.
    DuplicateCode {
        code: MeasurementCode,
        first_line: usize,
    },
    /// No grammar rule matched the line.
    Unparseable { text: String },

    // Structure
    /// Required codes absent from the parsed measurements.
    MissingRequired { codes: Vec<MeasurementCode> },
    /// Keys outside the closed code set in an externally supplied map.
    InvalidCodes { codes: Vec<String> },
}

impl DiagnosticKind {
    pub fn severity(&self) -> DiagnosticSeverity {
        match self {
            DiagnosticKind::Unreadable { .. }
            | DiagnosticKind::NotUtf8
            | DiagnosticKind::EmptySource
            | DiagnosticKind::MissingRequired { .. }
            | DiagnosticKind::InvalidCodes { .. } => DiagnosticSeverity::Blocking,
            DiagnosticKind::UnknownCode { .. }
            | DiagnosticKind::InvalidNumber { .. }
            | DiagnosticKind::NonPositive { .. }
            | DiagnosticKind::DuplicateCode { .. }
            | DiagnosticKind::Unparseable { .. } => DiagnosticSeverity::Informational,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Unreadable { reason } => {
                write!(f, "Error: Cannot read file - {reason}")
            }
            DiagnosticKind::NotUtf8 => f.write_str("Error: File is not UTF-8 encoded"),
            DiagnosticKind::EmptySource => f.write_str("Error: File is empty"),
            DiagnosticKind::UnknownCode { code } => write!(
                f,
                "Unknown measurement code '{code}'. Valid codes are: {}",
                MeasurementCode::valid_codes_list()
            ),
            DiagnosticKind::InvalidNumber { code, value } => {
                write!(f, "Invalid numeric value '{value}' for code {code}")
            }
            DiagnosticKind::NonPositive { code, value } => {
                write!(f, "Measurement {code} must be positive, got {value}")
            }
            DiagnosticKind::DuplicateCode { code, first_line } => write!(
                f,
                "Duplicate measurement code '{code}' (first recorded on line {first_line})"
            ),
            DiagnosticKind::Unparseable { text } => {
                write!(f, "Could not parse line format: '{text}'")
            }
            DiagnosticKind::MissingRequired { codes } => {
                write!(f, "Missing required measurement(s): {}", join_codes(codes))
            }
            DiagnosticKind::InvalidCodes { codes } => {
                write!(f, "Invalid measurement code(s): {}", codes.join(", "))
            }
        }
    }
}

/// One recorded issue, optionally tied to a 1-based source line.
///
/// Serializes as its rendered message so result records keep the plain
/// `parse_errors: [string]` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Diagnostic {
    pub line: Option<usize>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn at_line(line: usize, kind: DiagnosticKind) -> Self {
        Self {
            line: Some(line),
            kind,
        }
    }

    pub fn file_level(kind: DiagnosticKind) -> Self {
        Self { line: None, kind }
    }

    pub fn severity(&self) -> DiagnosticSeverity {
        self.kind.severity()
    }

    pub fn is_blocking(&self) -> bool {
        self.severity() == DiagnosticSeverity::Blocking
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "Line {line}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl From<Diagnostic> for String {
    fn from(value: Diagnostic) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_diagnostics_are_prefixed() {
        let diagnostic = Diagnostic::at_line(
            4,
            DiagnosticKind::NonPositive {
                code: MeasurementCode::D,
                value: "-5.0".to_string(),
            },
        );
        assert_eq!(
            diagnostic.message(),
            "Line 4: Measurement D must be positive, got -5.0"
        );
        assert!(!diagnostic.is_blocking());
    }

    #[test]
    fn source_failures_block() {
        let diagnostic = Diagnostic::file_level(DiagnosticKind::EmptySource);
        assert_eq!(diagnostic.message(), "Error: File is empty");
        assert!(diagnostic.is_blocking());
    }

    #[test]
    fn unknown_code_lists_every_valid_code() {
        let message = DiagnosticKind::UnknownCode {
            code: "Z".to_string(),
        }
        .to_string();
        assert!(message.starts_with("Unknown measurement code 'Z'. Valid codes are: A, B, C"));
        assert!(message.ends_with("P, PRINT_PLACEMENT_FROM_CF, Q, R, S, T"));
    }
}
