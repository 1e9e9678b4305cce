//! Embedded reference data.
//!
//! The default sweatshirt chart and tolerance policy are embedded at compile
//! time using `include_str!()`, so a bare binary validates without any
//! configuration files.

/// Origin label used in errors and reports for embedded data.
pub const EMBEDDED_ORIGIN: &str = "embedded";

/// Sweatshirt chart, sizes 6/7 to 13/14.
pub const SWEATSHIRT_CHART_CSV: &str = include_str!("../data/sweatshirt_chart.csv");

/// Default tolerance 1.0 cm, neck width 0.5 cm.
pub const DEFAULT_TOLERANCES_TOML: &str = include_str!("../data/tolerances.toml");
