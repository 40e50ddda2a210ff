//! Backup and restore of lifecycle rule sets

pub mod manager;

pub use manager::{BackupManager, BACKUP_FILE_SUFFIX};
