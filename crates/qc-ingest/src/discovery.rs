//! Measurement file discovery.

use std::path::{Path, PathBuf};

use crate::error::{Result, SourceError};

/// Extension accepted for measurement files.
pub const MEASUREMENT_EXTENSION: &str = "txt";

/// Whether a path looks like a measurement file (`.txt`, any case).
pub fn is_measurement_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MEASUREMENT_EXTENSION))
}

/// Lists all measurement files in a directory.
///
/// Returns files sorted by filename. Subdirectories are not searched.
pub fn list_measurement_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SourceError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| SourceError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| SourceError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() && is_measurement_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_measurement_files() {
        let dir = TempDir::new().unwrap();
        for name in ["b.txt", "a.TXT", "chart.csv", "notes.md"] {
            std::fs::write(dir.path().join(name), "A: 1").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = list_measurement_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .filter_map(|p| p.file_name()?.to_str())
            .collect();
        assert_eq!(names, vec!["a.TXT", "b.txt"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = list_measurement_files(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, SourceError::DirectoryNotFound { .. }));
    }

    #[test]
    fn test_is_measurement_file() {
        assert!(is_measurement_file(Path::new("run1.txt")));
        assert!(is_measurement_file(Path::new("RUN1.Txt")));
        assert!(!is_measurement_file(Path::new("run1.pdf")));
        assert!(!is_measurement_file(Path::new("txt")));
    }
}
