//! Line parser for operator-authored measurement text.
//!
//! Each non-blank, non-comment line is tried against an ordered list of
//! grammar rules; the first rule that matches decides the code and value
//! tokens. A matched line is then checked (known code, plain decimal value,
//! positive, not a duplicate) and either recorded or turned into a
//! diagnostic. Parsing is total: every line is classified and a bad line
//! never stops the lines after it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use qc_model::{Diagnostic, DiagnosticKind, MeasurementCode, ParsedMeasurements};
use regex::Regex;
use tracing::{debug, info};

use crate::source::TextSource;

/// `Length from shoulder (A): 50.1`, `Neck Width (Seam to Seam) (H): 16.2`
///
/// The label may hold its own parentheses; the last group before the
/// separator is the code.
static LABELED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^.*\(\s*(?P<code>[A-Z][A-Z0-9_]*)\s*\)\s*[:=]\s*(?P<value>\S+?)\s*(?:cm|x\s*\d*(?:\.\d+)?)?\s*$",
    )
    .expect("Invalid labeled code regex")
});

/// `A: 50.1`, `C: 44.0 cm`, `E: 40.7x 2`
static BARE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?P<code>[A-Z][A-Z0-9_]*)\s*[:=]\s*(?P<value>\S+?)\s*(?:cm|x\s*\d*(?:\.\d+)?)?\s*$",
    )
    .expect("Invalid bare code regex")
});

/// `A = 50.1` followed by anything.
static EQUALS_FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<code>[A-Z][A-Z0-9_]*)\s*=\s*(?P<value>[0-9]+(?:\.[0-9]*)?)")
        .expect("Invalid equals fallback regex")
});

/// Plain decimal with optional sign. No exponent, `inf` or `nan`.
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)$").expect("Invalid decimal regex")
});

/// Line shapes in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrammarRule {
    LabeledCode,
    BareCode,
    EqualsFallback,
}

impl GrammarRule {
    pub const ALL: [GrammarRule; 3] = [
        GrammarRule::LabeledCode,
        GrammarRule::BareCode,
        GrammarRule::EqualsFallback,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            GrammarRule::LabeledCode => &*LABELED_CODE,
            GrammarRule::BareCode => &*BARE_CODE,
            GrammarRule::EqualsFallback => &*EQUALS_FALLBACK,
        }
    }
}

/// Code and value tokens pulled out of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'l> {
    pub rule: GrammarRule,
    pub code: &'l str,
    pub value: &'l str,
}

/// Apply the grammar rules to a trimmed line, first match wins.
pub fn match_line(line: &str) -> Option<LineMatch<'_>> {
    GrammarRule::ALL.into_iter().find_map(|rule| {
        let captures = rule.pattern().captures(line)?;
        Some(LineMatch {
            rule,
            code: captures.name("code")?.as_str(),
            value: captures.name("value")?.as_str(),
        })
    })
}

/// How a single line was classified.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Skipped,
    Recorded { code: MeasurementCode, value: f64 },
    Rejected(DiagnosticKind),
}

/// Per-class line counts. Every line lands in exactly one class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub skipped: usize,
    pub recorded: usize,
    pub rejected: usize,
}

impl LineCounts {
    pub fn total(&self) -> usize {
        self.skipped + self.recorded + self.rejected
    }
}

/// Measurements and diagnostics from one parse call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub measurements: ParsedMeasurements,
    /// In source-line order.
    pub diagnostics: Vec<Diagnostic>,
    pub lines: LineCounts,
}

impl ParseOutcome {
    fn source_failure(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Self::default()
        }
    }

    pub fn has_blocking(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_blocking)
    }

    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::message).collect()
    }
}

/// Read and parse a source. Read failures become one blocking diagnostic.
pub fn parse_source(source: TextSource<'_>) -> ParseOutcome {
    match source.read() {
        Ok(text) => parse_text(&text),
        Err(err) => {
            debug!(source = %source.describe(), error = %err, "source rejected");
            ParseOutcome::source_failure(err.to_diagnostic())
        }
    }
}

/// Parse already-decoded text line by line.
pub fn parse_text(text: &str) -> ParseOutcome {
    let mut outcome = ParseOutcome::default();
    let mut first_seen: BTreeMap<MeasurementCode, usize> = BTreeMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        match classify_line(raw, &first_seen) {
            LineOutcome::Skipped => outcome.lines.skipped += 1,
            LineOutcome::Recorded { code, value } => {
                first_seen.insert(code, line_no);
                outcome.measurements.insert(code, value);
                outcome.lines.recorded += 1;
            }
            LineOutcome::Rejected(kind) => {
                debug!(line = line_no, %kind, "line rejected");
                outcome.diagnostics.push(Diagnostic::at_line(line_no, kind));
                outcome.lines.rejected += 1;
            }
        }
    }

    info!(
        lines = outcome.lines.total(),
        recorded = outcome.lines.recorded,
        rejected = outcome.lines.rejected,
        "parsed measurement text"
    );
    outcome
}

/// Classify one raw line given the codes already recorded (code to line).
pub fn classify_line(raw: &str, recorded: &BTreeMap<MeasurementCode, usize>) -> LineOutcome {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineOutcome::Skipped;
    }

    let Some(matched) = match_line(line) else {
        return LineOutcome::Rejected(DiagnosticKind::Unparseable {
            text: line.to_string(),
        });
    };

    let Some(code) = MeasurementCode::parse(matched.code) else {
        return LineOutcome::Rejected(DiagnosticKind::UnknownCode {
            code: matched.code.to_ascii_uppercase(),
        });
    };

    let Some(value) = parse_decimal(matched.value) else {
        return LineOutcome::Rejected(DiagnosticKind::InvalidNumber {
            code,
            value: matched.value.to_string(),
        });
    };

    if value <= 0.0 {
        return LineOutcome::Rejected(DiagnosticKind::NonPositive {
            code,
            value: matched.value.to_string(),
        });
    }

    if let Some(first_line) = recorded.get(&code) {
        return LineOutcome::Rejected(DiagnosticKind::DuplicateCode {
            code,
            first_line: *first_line,
        });
    }

    LineOutcome::Recorded { code, value }
}

/// Parse a plain decimal token.
pub fn parse_decimal(token: &str) -> Option<f64> {
    if !DECIMAL.is_match(token) {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}
