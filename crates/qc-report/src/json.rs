use std::io::Write;

use anyhow::{Context, Result};
use qc_model::ValidationResult;

/// Write the result as pretty JSON followed by a newline.
pub fn write_json<W: Write>(result: &ValidationResult, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, result).context("serialize validation result")?;
    writeln!(writer).context("write validation result")?;
    Ok(())
}

pub fn to_json_string(result: &ValidationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("serialize validation result")
}
