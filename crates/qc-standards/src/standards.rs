//! The reference data in force for a validation run.

use std::fmt;
use std::path::PathBuf;

use qc_model::{SizeCode, Summary};
use tracing::info;

use crate::chart::{ReferenceChart, SizeChart, load_chart_csv};
use crate::embedded::{DEFAULT_TOLERANCES_TOML, EMBEDDED_ORIGIN, SWEATSHIRT_CHART_CSV};
use crate::error::Result;
use crate::hash::sha256_hex;
use crate::paths::StandardsPaths;
use crate::tolerance::{TolerancePolicy, load_tolerance_toml};

/// Where a piece of reference data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataOrigin::Embedded => f.write_str(EMBEDDED_ORIGIN),
            DataOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reference chart plus tolerance policy. Built once, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Standards {
    chart: ReferenceChart,
    tolerances: TolerancePolicy,
    chart_origin: DataOrigin,
    tolerance_origin: DataOrigin,
}

impl Standards {
    pub fn new(chart: ReferenceChart, tolerances: TolerancePolicy) -> Self {
        Self {
            chart,
            tolerances,
            chart_origin: DataOrigin::Embedded,
            tolerance_origin: DataOrigin::Embedded,
        }
    }

    /// The compiled-in sweatshirt chart and default tolerances.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(embedded_chart()?, embedded_tolerances()?))
    }

    /// Load each piece from its path, falling back to embedded data.
    pub fn load(paths: &StandardsPaths) -> Result<Self> {
        let (chart, chart_origin) = match &paths.chart {
            Some(path) => (load_chart_csv(path)?, DataOrigin::File(path.clone())),
            None => (embedded_chart()?, DataOrigin::Embedded),
        };
        let (tolerances, tolerance_origin) = match &paths.tolerances {
            Some(path) => (load_tolerance_toml(path)?, DataOrigin::File(path.clone())),
            None => (embedded_tolerances()?, DataOrigin::Embedded),
        };
        let standards = Self {
            chart,
            tolerances,
            chart_origin,
            tolerance_origin,
        };
        info!(
            chart = %standards.chart_origin,
            tolerances = %standards.tolerance_origin,
            sizes = standards.chart.len(),
            "loaded reference data"
        );
        Ok(standards)
    }

    pub fn chart(&self) -> &ReferenceChart {
        &self.chart
    }

    pub fn tolerances(&self) -> &TolerancePolicy {
        &self.tolerances
    }

    pub fn chart_origin(&self) -> &DataOrigin {
        &self.chart_origin
    }

    pub fn tolerance_origin(&self) -> &DataOrigin {
        &self.tolerance_origin
    }

    pub fn size_chart(&self, size: &SizeCode) -> Option<&SizeChart> {
        self.chart.get(size)
    }

    /// Empty run summary carrying the tolerance policy in force.
    pub fn empty_summary(&self) -> Summary {
        Summary::new(
            self.tolerances.default_tolerance(),
            self.tolerances.overrides().clone(),
        )
    }

    /// SHA-256 over the canonical chart and tolerance content.
    ///
    /// Independent of file formatting, so the same values always yield the
    /// same fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut canonical = self.chart.canonical_text();
        canonical.push_str("--\n");
        canonical.push_str(&self.tolerances.canonical_text());
        sha256_hex(canonical.as_bytes())
    }
}

fn embedded_chart() -> Result<ReferenceChart> {
    ReferenceChart::from_csv_str(SWEATSHIRT_CHART_CSV, EMBEDDED_ORIGIN)
}

fn embedded_tolerances() -> Result<TolerancePolicy> {
    TolerancePolicy::from_toml_str(DEFAULT_TOLERANCES_TOML, EMBEDDED_ORIGIN)
}
