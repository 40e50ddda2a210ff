//! Backup manager for lifecycle policies
//!
//! Persists each bucket's raw rule set as a pretty-printed JSON file named
//! `<bucket>_lifecycle_backup.json` and replays a file back to the storage
//! service on restore. The backup carries the provider rule structure, not
//! the flattened report records, so a restore is a true inverse of the
//! export.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::{LifecycleError, LifecycleResult};
use crate::models::LifecycleRule;
use crate::remote::StorageApi;

/// Filename suffix shared by every backup file
pub const BACKUP_FILE_SUFFIX: &str = "_lifecycle_backup.json";

/// Manages per-bucket lifecycle backups in one directory
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a new BackupManager, creating the directory if needed
    pub fn new(backup_dir: impl Into<PathBuf>) -> LifecycleResult<Self> {
        let backup_dir = backup_dir.into();
        fs::create_dir_all(&backup_dir).map_err(|e| {
            LifecycleError::Io(format!("Failed to create backup directory: {}", e))
        })?;
        Ok(Self { backup_dir })
    }

    /// Get the backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// The deterministic backup path for a bucket
    pub fn backup_path(&self, bucket: &str) -> PathBuf {
        self.backup_dir.join(format!("{}{}", bucket, BACKUP_FILE_SUFFIX))
    }

    /// Export the lifecycle policies of the given buckets to backup files
    ///
    /// Buckets with an empty rule set are skipped: no file is written and
    /// the skip is logged as informational. Existing backup files for
    /// processed buckets are overwritten; stale files for buckets no longer
    /// present are left alone.
    ///
    /// Returns the paths of the files written.
    pub fn export_policies(
        &self,
        policies: &BTreeMap<String, Vec<LifecycleRule>>,
    ) -> LifecycleResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (bucket, rules) in policies {
            if rules.is_empty() {
                info!("No lifecycle configuration to export for bucket {}", bucket);
                continue;
            }
            let path = self.backup_path(bucket);
            let json = serde_json::to_string_pretty(rules).map_err(|e| {
                LifecycleError::Json(format!("Failed to serialize backup: {}", e))
            })?;
            fs::write(&path, json).map_err(|e| {
                LifecycleError::Io(format!(
                    "Failed to write backup file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            info!(
                "Exported lifecycle policy for bucket {} to {}",
                bucket,
                path.display()
            );
            written.push(path);
        }
        Ok(written)
    }

    /// Read a bucket's backup file back into a rule set
    ///
    /// Fails with `BackupMissing` when no file exists and `BackupCorrupt`
    /// when the file cannot be parsed as a rule array. A truncated write is
    /// indistinguishable from any other corrupt file and surfaces the same
    /// way.
    pub fn read_backup(&self, bucket: &str) -> LifecycleResult<Vec<LifecycleRule>> {
        let path = self.backup_path(bucket);
        if !path.exists() {
            return Err(LifecycleError::BackupMissing {
                bucket: bucket.to_string(),
                path,
            });
        }
        let contents = fs::read_to_string(&path).map_err(|e| {
            LifecycleError::Io(format!(
                "Failed to read backup file {}: {}",
                path.display(),
                e
            ))
        })?;
        serde_json::from_str(&contents).map_err(|e| LifecycleError::BackupCorrupt {
            path,
            reason: e.to_string(),
        })
    }

    /// Restore a bucket's lifecycle configuration from its backup file
    ///
    /// Replays the backed-up rule set as a full replacement of whatever is
    /// currently configured on the bucket. Repeated restores reach the same
    /// end state; out-of-band changes made since the backup are overwritten.
    pub fn restore(&self, api: &dyn StorageApi, bucket: &str) -> LifecycleResult<()> {
        let rules = self.read_backup(bucket).inspect_err(|e| error!("{}", e))?;

        api.put_lifecycle_configuration(bucket, &rules)
            .inspect_err(|e| error!("{}", e))?;
        info!(
            "Restored lifecycle policy for bucket {} from {}",
            bucket,
            self.backup_path(bucket).display()
        );
        Ok(())
    }

    /// List all backup filenames in the backup directory
    ///
    /// A plain directory scan for the backup naming convention; no check
    /// that the named buckets still exist.
    pub fn list_backups(&self) -> LifecycleResult<Vec<String>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LifecycleError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry
                .map_err(|e| LifecycleError::Io(format!("Failed to read directory entry: {}", e)))?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(BACKUP_FILE_SUFFIX) {
                backups.push(name);
            }
        }
        backups.sort();
        Ok(backups)
    }
}
