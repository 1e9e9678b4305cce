//! Shared CSV utilities for loading reference charts.

use std::io::Read;

use csv::ReaderBuilder;

use crate::error::{Result, StandardsError};

/// Header names plus trimmed row values, in file order.
#[derive(Debug, Clone, Default)]
pub struct CsvRows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a headed CSV into trimmed rows.
///
/// Handles BOM characters on the first header and skips fully blank rows.
pub fn read_csv_rows<R: Read>(reader: R, origin: &str) -> Result<CsvRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let csv_error = |source| StandardsError::Csv {
        origin: origin.to_string(),
        source,
    };

    let headers = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(CsvRows { headers, rows })
}

/// Index of a header, compared case-insensitively.
pub fn header_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_blank_rows() {
        let text = "\u{feff}Size , A\n6/7, 50.1\n,\n7/8,52.7\n";
        let rows = read_csv_rows(text.as_bytes(), "inline").unwrap();
        assert_eq!(rows.headers, vec!["Size", "A"]);
        assert_eq!(rows.rows.len(), 2);
        assert_eq!(rows.rows[0], vec!["6/7", "50.1"]);
        assert_eq!(header_index(&rows.headers, "size"), Some(0));
    }

    #[test]
    fn ragged_rows_are_errors() {
        let text = "size,A\n6/7,50.1,99\n";
        let err = read_csv_rows(text.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, StandardsError::Csv { .. }));
    }
}
