use std::io::Write;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use qc_model::ValidationResult;

/// Header row, matching the serialized verdict field names.
pub const VERDICT_COLUMNS: [&str; 7] = [
    "code",
    "measurement_name",
    "measured_value",
    "standard_value",
    "deviation",
    "tolerance",
    "status",
];

/// Write one CSV row per verdict. The header is written even with no rows.
pub fn write_verdicts_csv<W: Write>(result: &ValidationResult, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(VERDICT_COLUMNS)
        .context("write verdict header")?;
    for verdict in &result.measurements {
        csv.serialize(verdict)
            .with_context(|| format!("write verdict for {}", verdict.code))?;
    }
    csv.flush().context("flush verdict csv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{TimeZone, Utc};
    use qc_model::{MeasurementCode, MeasurementVerdict, RunIdentity, Status, Summary};

    use super::*;

    #[test]
    fn one_row_per_verdict() {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let mut result = ValidationResult::unparsed(
            "6/7",
            timestamp,
            &RunIdentity::anonymous(),
            Vec::new(),
            Summary::new(1.0, BTreeMap::new()),
        );
        result.measurements.push(MeasurementVerdict {
            code: MeasurementCode::B,
            measurement_name: "Chest Width".to_string(),
            measured_value: 46.0,
            standard_value: 44.0,
            deviation: 2.0,
            tolerance: 1.0,
            status: Status::Fail,
        });

        let mut out = Vec::new();
        write_verdicts_csv(&result, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "code,measurement_name,measured_value,standard_value,deviation,tolerance,status"
        );
        assert_eq!(lines[1], "B,Chest Width,46.0,44.0,2.0,1.0,FAIL");
        assert_eq!(lines.len(), 2);
    }
}
