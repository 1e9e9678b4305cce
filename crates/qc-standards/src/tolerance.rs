//! Tolerance policy: a default tolerance plus per-code overrides.

use std::collections::BTreeMap;
use std::path::Path;

use qc_model::MeasurementCode;
use serde::Deserialize;

use crate::error::{Result, StandardsError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToleranceFile {
    tolerance: ToleranceSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToleranceSection {
    default: f64,
    #[serde(default)]
    overrides: BTreeMap<String, f64>,
}

/// Allowed absolute deviation, in centimetres, per measurement code.
#[derive(Debug, Clone, PartialEq)]
pub struct TolerancePolicy {
    default: f64,
    overrides: BTreeMap<MeasurementCode, f64>,
}

impl TolerancePolicy {
    pub fn new(default: f64, overrides: BTreeMap<MeasurementCode, f64>) -> Result<Self> {
        check_tolerance("default", default)?;
        for (code, value) in &overrides {
            check_tolerance(code.as_str(), *value)?;
        }
        Ok(Self { default, overrides })
    }

    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let file: ToleranceFile = toml::from_str(text).map_err(|source| StandardsError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        let mut overrides = BTreeMap::new();
        for (key, value) in file.tolerance.overrides {
            let code =
                MeasurementCode::parse(&key).ok_or_else(|| StandardsError::UnknownToleranceCode {
                    origin: origin.to_string(),
                    code: key.clone(),
                })?;
            overrides.insert(code, value);
        }
        Self::new(file.tolerance.default, overrides)
    }

    /// Tolerance applied to `code`: its override, else the default.
    pub fn tolerance_for(&self, code: MeasurementCode) -> f64 {
        self.overrides.get(&code).copied().unwrap_or(self.default)
    }

    pub fn default_tolerance(&self) -> f64 {
        self.default
    }

    pub fn overrides(&self) -> &BTreeMap<MeasurementCode, f64> {
        &self.overrides
    }

    pub fn canonical_text(&self) -> String {
        let mut out = format!("default\t{}\n", self.default);
        for (code, value) in &self.overrides {
            out.push_str(&format!("{code}\t{value}\n"));
        }
        out
    }
}

/// Load a tolerance TOML file from disk.
pub fn load_tolerance_toml(path: &Path) -> Result<TolerancePolicy> {
    let text = std::fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
    TolerancePolicy::from_toml_str(&text, &path.display().to_string())
}

fn check_tolerance(scope: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(StandardsError::InvalidTolerance {
            scope: scope.to_string(),
            value,
        })
    }
}
