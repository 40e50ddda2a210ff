use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use s3_lifecycle_manager::cli::{
    handle_backups_command, handle_glue_command, handle_report_command, handle_restore_command,
};
use s3_lifecycle_manager::config::{
    Settings, DEFAULT_GLUE_BUCKETS_FILE, DEFAULT_GLUE_REPORT_FILE, DEFAULT_REPORT_FILE,
};
use s3_lifecycle_manager::remote::aws::{AwsJobsClient, AwsStorageClient};

#[derive(Parser)]
#[command(
    name = "s3-lifecycle",
    version,
    about = "Inventory, report, backup and restore S3 bucket lifecycle policies",
    long_about = "Lists the buckets in the account, extracts their lifecycle rules \
                  into a CSV report, and exports each bucket's raw rule set as a \
                  JSON backup that can later be restored. Also scans AWS Glue jobs \
                  to report where temporary and Spark UI log artifacts are written."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process all buckets: write the CSV report and export backups
    Report {
        /// Path of the CSV report to write
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        output: PathBuf,
        /// Directory holding per-bucket backup files
        #[arg(long, env = "S3_LIFECYCLE_BACKUP_DIR")]
        backup_dir: Option<PathBuf>,
        /// Write the report only, without exporting backups
        #[arg(long)]
        skip_backup: bool,
    },

    /// Restore a bucket's lifecycle configuration from its backup
    Restore {
        /// Name of the bucket to restore
        bucket: String,
        /// Directory holding per-bucket backup files
        #[arg(long, env = "S3_LIFECYCLE_BACKUP_DIR")]
        backup_dir: Option<PathBuf>,
    },

    /// List available backup files
    Backups {
        /// Directory holding per-bucket backup files
        #[arg(long, env = "S3_LIFECYCLE_BACKUP_DIR")]
        backup_dir: Option<PathBuf>,
    },

    /// Scan Glue jobs and report temporary and Spark UI log paths
    GlueReport {
        /// Path of the jobs CSV report to write
        #[arg(short, long, default_value = DEFAULT_GLUE_REPORT_FILE)]
        output: PathBuf,
        /// Path of the distinct-buckets CSV report to write
        #[arg(long, default_value = DEFAULT_GLUE_BUCKETS_FILE)]
        buckets_output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report {
            output,
            backup_dir,
            skip_backup,
        } => {
            let settings = Settings::resolve(backup_dir);
            let api = AwsStorageClient::new()?;
            handle_report_command(&api, &settings, &output, skip_backup)?;
        }
        Commands::Restore { bucket, backup_dir } => {
            let settings = Settings::resolve(backup_dir);
            let api = AwsStorageClient::new()?;
            handle_restore_command(&api, &settings, &bucket)?;
        }
        Commands::Backups { backup_dir } => {
            let settings = Settings::resolve(backup_dir);
            handle_backups_command(&settings)?;
        }
        Commands::GlueReport {
            output,
            buckets_output,
        } => {
            let api = AwsJobsClient::new()?;
            handle_glue_command(&api, &output, &buckets_output)?;
        }
    }
    Ok(())
}
