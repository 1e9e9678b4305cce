//! Rendering a single validation result in the requested format.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use qc_model::ValidationResult;
use qc_report::{render_text, to_json_string, write_verdicts_csv};

use crate::summary::render_result_table;

/// Output format for `validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Terminal table with a short header.
    #[default]
    Table,
    /// Full result record as pretty JSON.
    Json,
    /// One CSV row per verdict.
    Csv,
    /// Plain-text QC sheet.
    Text,
}

pub fn render_result(result: &ValidationResult, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(render_result_table(result)),
        ReportFormat::Json => {
            let mut json = to_json_string(result)?;
            json.push('\n');
            Ok(json)
        }
        ReportFormat::Csv => {
            let mut out = Vec::new();
            write_verdicts_csv(result, &mut out)?;
            String::from_utf8(out).context("verdict csv is not utf-8")
        }
        ReportFormat::Text => Ok(render_text(result)),
    }
}

/// Write the rendered result to `path`, replacing any existing file.
pub fn write_result_file(result: &ValidationResult, format: ReportFormat, path: &Path) -> Result<()> {
    let rendered = render_result(result, format)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(rendered.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
