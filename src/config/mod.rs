//! Configuration and path management
//!
//! Resolves where backups and CSV reports are written.
//!
//! ## Backup directory resolution order
//!
//! 1. Explicit `--backup-dir` flag
//! 2. `S3_LIFECYCLE_BACKUP_DIR` environment variable
//! 3. `./backups` relative to the working directory

use std::path::{Path, PathBuf};

use crate::error::{LifecycleError, LifecycleResult};

/// Default backup directory when nothing else is configured
pub const DEFAULT_BACKUP_DIR: &str = "./backups";

/// Default lifecycle report filename
pub const DEFAULT_REPORT_FILE: &str = "lifecycle_buckets.csv";

/// Default Glue jobs report filename
pub const DEFAULT_GLUE_REPORT_FILE: &str = "glue_jobs_report.csv";

/// Default Glue buckets report filename
pub const DEFAULT_GLUE_BUCKETS_FILE: &str = "glue_jobs_buckets_report.csv";

/// Resolved paths used by one invocation
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding per-bucket backup files
    backup_dir: PathBuf,
}

impl Settings {
    /// Resolve settings from an optional explicit backup directory
    ///
    /// Falls back to the `S3_LIFECYCLE_BACKUP_DIR` environment variable,
    /// then to [`DEFAULT_BACKUP_DIR`].
    pub fn resolve(backup_dir: Option<PathBuf>) -> Self {
        let backup_dir = backup_dir
            .or_else(|| std::env::var("S3_LIFECYCLE_BACKUP_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BACKUP_DIR));
        Self { backup_dir }
    }

    /// Create settings with a fixed backup directory (useful for testing)
    pub fn with_backup_dir(backup_dir: PathBuf) -> Self {
        Self { backup_dir }
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Ensure the backup directory exists
    pub fn ensure_backup_dir(&self) -> LifecycleResult<()> {
        std::fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LifecycleError::Config(format!(
                "Failed to create backup directory {}: {}",
                self.backup_dir.display(),
                e
            ))
        })
    }
}
