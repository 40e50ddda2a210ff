//! Custom error types for the lifecycle manager
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for lifecycle manager operations
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// CSV report export errors
    #[error("Export error: {0}")]
    Export(String),

    /// No backup file exists for the requested bucket
    #[error("No backup found for bucket '{bucket}' at {path}")]
    BackupMissing { bucket: String, path: PathBuf },

    /// A backup file exists but could not be parsed as a rule set
    #[error("Backup file {path} is corrupt: {reason}")]
    BackupCorrupt { path: PathBuf, reason: String },

    /// A remote call other than a lifecycle replacement failed
    #[error("Remote error: {0}")]
    Remote(String),

    /// The storage service rejected a lifecycle replacement
    #[error("Failed to restore lifecycle configuration for bucket '{bucket}': {reason}")]
    RemoteWrite { bucket: String, reason: String },
}

impl LifecycleError {
    /// Check if this is a missing-backup error
    pub fn is_backup_missing(&self) -> bool {
        matches!(self, Self::BackupMissing { .. })
    }

    /// Check if this is a corrupt-backup error
    pub fn is_backup_corrupt(&self) -> bool {
        matches!(self, Self::BackupCorrupt { .. })
    }
}

impl From<std::io::Error> for LifecycleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LifecycleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for lifecycle manager operations
pub type LifecycleResult<T> = Result<T, LifecycleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LifecycleError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_backup_missing_error() {
        let err = LifecycleError::BackupMissing {
            bucket: "logs".into(),
            path: PathBuf::from("./backups/logs_lifecycle_backup.json"),
        };
        assert!(err.is_backup_missing());
        assert!(err.to_string().contains("logs_lifecycle_backup.json"));
    }

    #[test]
    fn test_remote_write_error() {
        let err = LifecycleError::RemoteWrite {
            bucket: "data".into(),
            reason: "MalformedXML".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to restore lifecycle configuration for bucket 'data': MalformedXML"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LifecycleError = io_err.into();
        assert!(matches!(err, LifecycleError::Io(_)));
    }
}
