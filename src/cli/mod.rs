//! Command handlers
//!
//! One handler per subcommand, wiring the remote clients into the core
//! passes. Per-bucket remote failures inside a pass are logged and the pass
//! continues; a failed restore is the only handler error that should stop
//! the process.

use std::path::Path;

use log::{error, info};

use crate::backup::BackupManager;
use crate::config::Settings;
use crate::error::LifecycleResult;
use crate::export;
use crate::jobs;
use crate::manager::LifecycleManager;
use crate::remote::{JobsApi, StorageApi};

/// Process every bucket: write the CSV report and export backups
pub fn handle_report_command(
    api: &dyn StorageApi,
    settings: &Settings,
    output: &Path,
    skip_backup: bool,
) -> LifecycleResult<()> {
    let manager = LifecycleManager::new(api);
    let bucket_names = manager.bucket_names()?;

    let records = manager.process_buckets(&bucket_names);
    export::save_policies_csv(&records, output)?;

    if skip_backup {
        info!("Skipping backup export");
        return Ok(());
    }

    let backup_manager = BackupManager::new(settings.backup_dir())?;
    let policies = manager.fetch_policies(&bucket_names);
    backup_manager.export_policies(&policies)?;
    Ok(())
}

/// Restore one bucket's lifecycle configuration from its backup
pub fn handle_restore_command(
    api: &dyn StorageApi,
    settings: &Settings,
    bucket: &str,
) -> LifecycleResult<()> {
    let backup_manager = BackupManager::new(settings.backup_dir())?;
    backup_manager.restore(api, bucket)
}

/// List the backup files present in the backup directory
pub fn handle_backups_command(settings: &Settings) -> LifecycleResult<()> {
    let backup_manager = BackupManager::new(settings.backup_dir())?;
    let backups = backup_manager.list_backups()?;
    if backups.is_empty() {
        println!("No backups found in {}", settings.backup_dir().display());
        return Ok(());
    }
    for name in backups {
        println!("{}", name);
    }
    Ok(())
}

/// Scan Glue jobs and write the log-path reports
pub fn handle_glue_command(
    api: &dyn JobsApi,
    output: &Path,
    buckets_output: &Path,
) -> LifecycleResult<()> {
    let glue_jobs = api.list_jobs().inspect_err(|e| error!("Error listing Glue jobs: {}", e))?;
    info!("Found {} Glue jobs", glue_jobs.len());

    let records = jobs::scan_jobs(&glue_jobs);
    export::save_glue_report_csv(&records, output)?;

    let buckets = jobs::distinct_buckets(&records);
    export::save_glue_buckets_csv(&buckets, buckets_output)?;
    Ok(())
}
