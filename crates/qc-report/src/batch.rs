use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use qc_model::{SizeCode, ValidationResult};
use serde::Serialize;

/// Passed and failed run counts for one size (or the total).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeTally {
    pub size: String,
    pub passed: usize,
    pub failed: usize,
}

impl SizeTally {
    fn new(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            passed: 0,
            failed: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of passing runs, rounded to 1 decimal place.
    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        let rate = self.passed as f64 / self.total() as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    }

    fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Run outcomes grouped by size, sizes in natural order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub sizes: Vec<SizeTally>,
    pub total: SizeTally,
}

impl BatchSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut by_size: BTreeMap<&str, SizeTally> = BTreeMap::new();
        let mut total = SizeTally::new("Total");
        for result in results {
            let passed = result.passed();
            by_size
                .entry(result.size.as_str())
                .or_insert_with(|| SizeTally::new(result.size.as_str()))
                .record(passed);
            total.record(passed);
        }
        let mut sizes: Vec<SizeTally> = by_size.into_values().collect();
        sizes.sort_by(|a, b| natural_size_order(&a.size, &b.size));
        Self { sizes, total }
    }
}

fn natural_size_order(left: &str, right: &str) -> Ordering {
    match (SizeCode::new(left), SizeCode::new(right)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => left.cmp(right),
    }
}

/// Write `Size,Passed,Failed,Pass Rate` rows plus a closing total row.
pub fn write_batch_csv<W: Write>(summary: &BatchSummary, writer: W) -> Result<()> {
    let mut csv = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv.write_record(["Size", "Passed", "Failed", "Pass Rate"])
        .context("write batch header")?;
    for tally in summary.sizes.iter().chain(std::iter::once(&summary.total)) {
        csv.write_record([
            tally.size.clone(),
            tally.passed.to_string(),
            tally.failed.to_string(),
            format!("{:.1}%", tally.pass_rate()),
        ])
        .with_context(|| format!("write batch row for {}", tally.size))?;
    }
    csv.flush().context("flush batch csv")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pass_rate_rounds_to_one_place() {
        let tally = SizeTally {
            size: "Total".to_string(),
            passed: 23,
            failed: 6,
        };
        assert_eq!(tally.pass_rate(), 79.3);
        assert_eq!(SizeTally::new("6/7").pass_rate(), 0.0);
    }

    #[test]
    fn sizes_sort_naturally() {
        let mut labels = vec!["13/14", "6/7", "11/12", "9/10"];
        labels.sort_by(|a, b| natural_size_order(a, b));
        assert_eq!(labels, vec!["6/7", "9/10", "11/12", "13/14"]);
    }
}
