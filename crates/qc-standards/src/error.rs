//! Error types for reference chart and tolerance loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading reference data.
///
/// `origin` names where the data came from: a file path or `embedded`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or parse the chart CSV.
    #[error("failed to read chart CSV {origin}: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("failed to parse tolerance TOML {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("chart {origin} has no 'size' column")]
    MissingSizeColumn { origin: String },

    #[error("chart {origin} has unknown measurement code column '{column}'")]
    UnknownCodeColumn { origin: String, column: String },

    #[error("chart {origin} has an empty size label on row {row}")]
    BlankSize { origin: String, row: usize },

    #[error("chart {origin} lists size '{size}' more than once")]
    DuplicateSize { origin: String, size: String },

    /// Standard values must be plain positive numbers.
    #[error("chart {origin} has invalid standard value '{value}' for {code} in size {size}")]
    InvalidStandardValue {
        origin: String,
        size: String,
        code: String,
        value: String,
    },

    #[error("chart {origin} size {size} is missing required codes: {missing}")]
    IncompleteSize {
        origin: String,
        size: String,
        missing: String,
    },

    #[error("chart {origin} defines no sizes")]
    EmptyChart { origin: String },

    #[error("tolerance file {origin} names unknown measurement code '{code}'")]
    UnknownToleranceCode { origin: String, code: String },

    #[error("tolerance for {scope} must be a non-negative number, got {value}")]
    InvalidTolerance { scope: String, value: f64 },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for reference data loading.
pub type Result<T> = std::result::Result<T, StandardsError>;
