//! Reference charts and tolerance policies for garment measurement QC.

#![deny(unsafe_code)]

pub mod chart;
pub mod csv_utils;
pub mod embedded;
pub mod error;
pub mod hash;
pub mod paths;
pub mod standards;
pub mod tolerance;

pub use crate::chart::{ReferenceChart, SizeChart, load_chart_csv};
pub use crate::error::{Result, StandardsError};
pub use crate::paths::{CHART_ENV_VAR, StandardsPaths, TOLERANCES_ENV_VAR};
pub use crate::standards::{DataOrigin, Standards};
pub use crate::tolerance::{TolerancePolicy, load_tolerance_toml};
