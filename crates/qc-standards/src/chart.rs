//! Reference chart: standard value per size and measurement code.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use qc_model::{MeasurementCode, SizeCode, join_codes};
use tracing::debug;

use crate::csv_utils::{header_index, read_csv_rows};
use crate::error::{Result, StandardsError};

/// Standard values for one size.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeChart {
    size: SizeCode,
    values: BTreeMap<MeasurementCode, f64>,
}

impl SizeChart {
    pub fn size(&self) -> &SizeCode {
        &self.size
    }

    pub fn get(&self, code: MeasurementCode) -> Option<f64> {
        self.values.get(&code).copied()
    }

    /// Standard values in canonical code order.
    pub fn iter(&self) -> impl Iterator<Item = (MeasurementCode, f64)> + '_ {
        self.values.iter().map(|(code, value)| (*code, *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// All sizes of one garment chart. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceChart {
    sizes: BTreeMap<SizeCode, SizeChart>,
}

impl ReferenceChart {
    /// Build a chart from per-size values.
    ///
    /// Every size must supply a positive value for each required code.
    pub fn new(
        origin: &str,
        sizes: impl IntoIterator<Item = (SizeCode, BTreeMap<MeasurementCode, f64>)>,
    ) -> Result<Self> {
        let mut charts = BTreeMap::new();
        for (size, values) in sizes {
            if let Some((code, value)) = values.iter().find(|(_, value)| !is_standard(**value)) {
                return Err(StandardsError::InvalidStandardValue {
                    origin: origin.to_string(),
                    size: size.to_string(),
                    code: code.to_string(),
                    value: value.to_string(),
                });
            }
            let missing: Vec<MeasurementCode> = MeasurementCode::required()
                .iter()
                .copied()
                .filter(|code| !values.contains_key(code))
                .collect();
            if !missing.is_empty() {
                return Err(StandardsError::IncompleteSize {
                    origin: origin.to_string(),
                    size: size.to_string(),
                    missing: join_codes(&missing),
                });
            }
            if charts.contains_key(&size) {
                return Err(StandardsError::DuplicateSize {
                    origin: origin.to_string(),
                    size: size.to_string(),
                });
            }
            charts.insert(size.clone(), SizeChart { size, values });
        }
        if charts.is_empty() {
            return Err(StandardsError::EmptyChart {
                origin: origin.to_string(),
            });
        }
        Ok(Self { sizes: charts })
    }

    /// Parse a chart from CSV: a `size` column plus one column per code.
    ///
    /// Headers match case-insensitively. Cells for optional codes may be blank.
    pub fn from_csv_reader<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let table = read_csv_rows(reader, origin)?;
        let size_idx =
            header_index(&table.headers, "size").ok_or_else(|| StandardsError::MissingSizeColumn {
                origin: origin.to_string(),
            })?;

        let mut columns = Vec::new();
        for (idx, header) in table.headers.iter().enumerate() {
            if idx == size_idx {
                continue;
            }
            let code =
                MeasurementCode::parse(header).ok_or_else(|| StandardsError::UnknownCodeColumn {
                    origin: origin.to_string(),
                    column: header.clone(),
                })?;
            columns.push((idx, code));
        }

        let mut sizes = Vec::with_capacity(table.rows.len());
        for (row_idx, row) in table.rows.iter().enumerate() {
            let label = row.get(size_idx).map(String::as_str).unwrap_or_default();
            let size = SizeCode::new(label).map_err(|_| StandardsError::BlankSize {
                origin: origin.to_string(),
                // header is line 1
                row: row_idx + 2,
            })?;
            let mut values = BTreeMap::new();
            for (idx, code) in &columns {
                let cell = row.get(*idx).map(String::as_str).unwrap_or_default();
                if cell.is_empty() {
                    continue;
                }
                let value = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|value| is_standard(*value))
                    .ok_or_else(|| StandardsError::InvalidStandardValue {
                        origin: origin.to_string(),
                        size: size.to_string(),
                        code: code.to_string(),
                        value: cell.to_string(),
                    })?;
                values.insert(*code, value);
            }
            sizes.push((size, values));
        }

        let chart = Self::new(origin, sizes)?;
        debug!(origin, sizes = chart.len(), "parsed reference chart");
        Ok(chart)
    }

    pub fn from_csv_str(text: &str, origin: &str) -> Result<Self> {
        Self::from_csv_reader(text.as_bytes(), origin)
    }

    pub fn get(&self, size: &SizeCode) -> Option<&SizeChart> {
        self.sizes.get(size)
    }

    /// Look up a size by its label. Surrounding whitespace is ignored.
    pub fn get_label(&self, label: &str) -> Option<&SizeChart> {
        SizeCode::new(label)
            .ok()
            .and_then(|size| self.sizes.get(&size))
    }

    /// Known sizes in natural order.
    pub fn sizes(&self) -> Vec<SizeCode> {
        self.sizes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SizeChart> {
        self.sizes.values()
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Comma-separated size labels, for diagnostics.
    pub fn valid_sizes_list(&self) -> String {
        self.sizes
            .keys()
            .map(SizeCode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Stable textual form used for fingerprinting.
    pub fn canonical_text(&self) -> String {
        let mut out = String::new();
        for chart in self.sizes.values() {
            for (code, value) in chart.iter() {
                out.push_str(&format!("{}\t{}\t{value}\n", chart.size, code));
            }
        }
        out
    }
}

/// Load a chart CSV from disk.
pub fn load_chart_csv(path: &Path) -> Result<ReferenceChart> {
    let file = File::open(path).map_err(|source| StandardsError::io(path, source))?;
    ReferenceChart::from_csv_reader(file, &path.display().to_string())
}

fn is_standard(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        let codes: Vec<&str> = MeasurementCode::all().iter().map(|c| c.as_str()).collect();
        format!("size,{}", codes.join(","))
    }

    fn row(size: &str, value: &str, optional: &str) -> String {
        let cells: Vec<&str> = MeasurementCode::all()
            .iter()
            .map(|code| if code.is_required() { value } else { optional })
            .collect();
        format!("{size},{}", cells.join(","))
    }

    #[test]
    fn blank_optional_cells_are_allowed() {
        let text = format!("{}\n{}\n", header(), row("M", "10.0", ""));
        let chart = ReferenceChart::from_csv_str(&text, "inline").unwrap();
        let size = chart.get_label("M").unwrap();
        assert_eq!(size.len(), 20);
        assert_eq!(size.get(MeasurementCode::PrintPlacementFromCf), None);
    }

    #[test]
    fn headers_are_case_insensitive() {
        let text = format!("{}\n{}\n", header().to_lowercase(), row("L", "3.5", "1.0"));
        let chart = ReferenceChart::from_csv_str(&text, "inline").unwrap();
        assert_eq!(
            chart.get_label("L").unwrap().get(MeasurementCode::PrintPlacementFromCf),
            Some(1.0)
        );
    }

    #[test]
    fn rejects_blank_required_cells() {
        let text = format!("{}\n{}\n", header(), row("M", "", "1.0"));
        let err = ReferenceChart::from_csv_str(&text, "inline").unwrap_err();
        assert!(matches!(err, StandardsError::IncompleteSize { .. }));
    }

    #[test]
    fn rejects_non_positive_values() {
        let text = format!("{}\n{}\n", header(), row("M", "-1", "1.0"));
        let err = ReferenceChart::from_csv_str(&text, "inline").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidStandardValue { .. }));
    }

    #[test]
    fn rejects_unknown_columns() {
        let text = "size,A,ZZ\nM,1,2\n";
        let err = ReferenceChart::from_csv_str(text, "inline").unwrap_err();
        assert!(
            matches!(err, StandardsError::UnknownCodeColumn { ref column, .. } if column == "ZZ")
        );
    }

    #[test]
    fn rejects_duplicate_sizes() {
        let text = format!(
            "{}\n{}\n{}\n",
            header(),
            row("M", "10", ""),
            row(" M ", "11", "")
        );
        let err = ReferenceChart::from_csv_str(&text, "inline").unwrap_err();
        assert!(matches!(err, StandardsError::DuplicateSize { .. }));
    }
}
