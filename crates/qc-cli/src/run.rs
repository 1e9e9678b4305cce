//! Inputs shared by the `validate` and `batch` commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use qc_ingest::{MEASUREMENT_EXTENSION, is_measurement_file};
use qc_model::RunIdentity;
use qc_standards::{Standards, StandardsPaths};
use qc_validate::ValidationEngine;
use uuid::Uuid;

/// Build an engine from explicit paths, the environment, or embedded data.
pub fn load_engine(chart: Option<&Path>, tolerances: Option<&Path>) -> Result<ValidationEngine> {
    let paths = StandardsPaths::resolve(chart, tolerances);
    let standards = Standards::load(&paths).context("load reference data")?;
    Ok(ValidationEngine::new(standards))
}

/// Only `.txt` measurement files are accepted.
pub fn ensure_measurement_file(path: &Path) -> Result<()> {
    if !is_measurement_file(path) {
        bail!(
            "{} is not a measurement file (expected .{MEASUREMENT_EXTENSION})",
            path.display()
        );
    }
    Ok(())
}

/// Identity for a run; a random session id is generated when none is given.
pub fn run_identity(operator: Option<&str>, session: Option<&str>) -> RunIdentity {
    let session = session
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    RunIdentity::new(operator.map(str::to_string), Some(session))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_session_is_kept() {
        let identity = run_identity(Some("op-1"), Some("line-3"));
        assert_eq!(identity.operator_id.as_deref(), Some("op-1"));
        assert_eq!(identity.session_id.as_deref(), Some("line-3"));
    }

    #[test]
    fn missing_session_is_generated() {
        let first = run_identity(None, None);
        let second = run_identity(None, None);
        let session = first.session_id.clone().unwrap();
        assert!(Uuid::parse_str(&session).is_ok());
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(first.operator_id, None);
    }

    #[test]
    fn non_text_files_are_rejected() {
        assert!(ensure_measurement_file(Path::new("run.txt")).is_ok());
        let err = ensure_measurement_file(Path::new("run.pdf")).unwrap_err();
        assert!(err.to_string().contains("expected .txt"));
    }
}
