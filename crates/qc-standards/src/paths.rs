//! Reference data path resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable for overriding the chart CSV.
pub const CHART_ENV_VAR: &str = "GARMENT_QC_CHART";

/// Environment variable for overriding the tolerance TOML.
pub const TOLERANCES_ENV_VAR: &str = "GARMENT_QC_TOLERANCES";

/// Files to load instead of the embedded defaults. `None` means embedded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardsPaths {
    pub chart: Option<PathBuf>,
    pub tolerances: Option<PathBuf>,
}

impl StandardsPaths {
    /// Resolve reference data locations.
    ///
    /// Resolution order:
    /// 1. explicit path (usually a CLI flag)
    /// 2. `GARMENT_QC_CHART` / `GARMENT_QC_TOLERANCES`
    /// 3. embedded defaults
    pub fn resolve(chart: Option<&Path>, tolerances: Option<&Path>) -> Self {
        Self::resolve_with(chart, tolerances, |key| std::env::var_os(key))
    }

    /// Same as [`StandardsPaths::resolve`] with an injectable environment.
    pub fn resolve_with(
        chart: Option<&Path>,
        tolerances: Option<&Path>,
        env: impl Fn(&str) -> Option<OsString>,
    ) -> Self {
        let pick = |explicit: Option<&Path>, key: &str| {
            explicit.map(Path::to_path_buf).or_else(|| {
                env(key)
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
        };
        Self {
            chart: pick(chart, CHART_ENV_VAR),
            tolerances: pick(tolerances, TOLERANCES_ENV_VAR),
        }
    }

    pub fn embedded() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(key: &str) -> Option<OsString> {
        match key {
            CHART_ENV_VAR => Some(OsString::from("/env/chart.csv")),
            TOLERANCES_ENV_VAR => Some(OsString::new()),
            _ => None,
        }
    }

    #[test]
    fn explicit_path_beats_environment() {
        let paths = StandardsPaths::resolve_with(Some(Path::new("cli.csv")), None, env);
        assert_eq!(paths.chart, Some(PathBuf::from("cli.csv")));
    }

    #[test]
    fn environment_beats_embedded() {
        let paths = StandardsPaths::resolve_with(None, None, env);
        assert_eq!(paths.chart, Some(PathBuf::from("/env/chart.csv")));
        // empty variables fall through to embedded
        assert_eq!(paths.tolerances, None);
    }

    #[test]
    fn nothing_set_means_embedded() {
        let paths = StandardsPaths::resolve_with(None, None, |_| None);
        assert_eq!(paths, StandardsPaths::embedded());
    }
}
