//! Error types for reading measurement sources.

use std::path::PathBuf;

use qc_model::{Diagnostic, DiagnosticKind};
use thiserror::Error;

/// Errors that can occur while reading measurement text or listing files.
#[derive(Debug, Error)]
pub enum SourceError {
    // === File System Errors ===
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Content Errors ===
    #[error("source is not valid UTF-8")]
    NotUtf8,

    #[error("source is empty")]
    Empty,
}

impl SourceError {
    /// The blocking diagnostic recorded when a source cannot be parsed.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let kind = match self {
            SourceError::NotUtf8 => DiagnosticKind::NotUtf8,
            SourceError::Empty => DiagnosticKind::EmptySource,
            SourceError::FileRead { source, .. } | SourceError::DirectoryRead { source, .. } => {
                DiagnosticKind::Unreadable {
                    reason: source.to_string(),
                }
            }
            SourceError::DirectoryNotFound { path } => DiagnosticKind::Unreadable {
                reason: format!("not found: {}", path.display()),
            },
        };
        Diagnostic::file_level(kind)
    }
}

impl From<SourceError> for Diagnostic {
    fn from(value: SourceError) -> Self {
        value.to_diagnostic()
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
