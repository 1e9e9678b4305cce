use chrono::SecondsFormat;
use qc_model::ValidationResult;

const RULE: &str = "========================================";

/// Render a plain-text QC sheet for one run.
pub fn render_text(result: &ValidationResult) -> String {
    let mut out = String::from("GARMENT MEASUREMENT QC REPORT\n");
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("Size:        {}\n", result.size));
    out.push_str(&format!(
        "Timestamp:   {}\n",
        result.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    out.push_str(&format!(
        "Operator:    {}\n",
        result.operator_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "Session:     {}\n",
        result.session_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "File parsed: {}\n",
        if result.file_parsed { "yes" } else { "no" }
    ));
    out.push_str(&format!("Result:      {}\n", result.overall_result));

    if !result.measurements.is_empty() {
        out.push_str("\nMeasurements\n");
        for verdict in &result.measurements {
            out.push_str(&format!(
                "  [{}] {} {}: measured {:.2}, standard {:.2}, deviation {:.2}, tolerance {:.2}\n",
                verdict.status,
                verdict.code,
                verdict.measurement_name,
                verdict.measured_value,
                verdict.standard_value,
                verdict.deviation,
                verdict.tolerance
            ));
        }
    }

    if !result.parse_errors.is_empty() {
        out.push_str("\nParse errors\n");
        for diagnostic in &result.parse_errors {
            out.push_str(&format!("  {diagnostic}\n"));
        }
    }

    if !result.validation_errors.is_empty() {
        out.push_str("\nValidation errors\n");
        for message in &result.validation_errors {
            out.push_str(&format!("  {message}\n"));
        }
    }

    out.push_str(&format!(
        "\nTotal: {}  Passed: {}  Failed: {}\n",
        result.summary.total_measurements,
        result.summary.passed_measurements,
        result.summary.failed_measurements
    ));
    out
}
