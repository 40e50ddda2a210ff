//! CSV export functionality
//!
//! Writes the lifecycle policy report and the Glue job reports. Column
//! order comes from the serde field order on the record types.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::error::{LifecycleError, LifecycleResult};
use crate::jobs::JobLogRecord;
use crate::policy::FlatPolicyRecord;

/// Write lifecycle policy records to any writer as CSV
pub fn write_policies_csv<W: Write>(
    records: &[FlatPolicyRecord],
    writer: &mut W,
) -> LifecycleResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| LifecycleError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| LifecycleError::Export(e.to_string()))?;
    Ok(())
}

/// Save the lifecycle policy report to a file
///
/// Writes nothing when there are no records, matching the report's
/// "no policies to save" behavior.
pub fn save_policies_csv(records: &[FlatPolicyRecord], path: &Path) -> LifecycleResult<()> {
    if records.is_empty() {
        warn!("No policies to save");
        return Ok(());
    }
    info!("Saving lifecycle policies to CSV file: {}", path.display());
    let mut file = File::create(path)
        .map_err(|e| LifecycleError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_policies_csv(records, &mut file)?;
    info!("Policies successfully saved to {}", path.display());
    Ok(())
}

/// Write Glue job log-path records to any writer as CSV
pub fn write_glue_report_csv<W: Write>(
    records: &[JobLogRecord],
    writer: &mut W,
) -> LifecycleResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| LifecycleError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| LifecycleError::Export(e.to_string()))?;
    Ok(())
}

/// Save the Glue jobs log-path report to a file
pub fn save_glue_report_csv(records: &[JobLogRecord], path: &Path) -> LifecycleResult<()> {
    if records.is_empty() {
        warn!("No Glue job details to save");
        return Ok(());
    }
    info!("Saving Glue jobs report to CSV file: {}", path.display());
    let mut file = File::create(path)
        .map_err(|e| LifecycleError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_glue_report_csv(records, &mut file)?;
    info!("Glue jobs report successfully saved to {}", path.display());
    Ok(())
}

/// Write the distinct Glue bucket list to any writer as CSV
pub fn write_glue_buckets_csv<W: Write>(
    buckets: &BTreeSet<String>,
    writer: &mut W,
) -> LifecycleResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["BucketName"])
        .map_err(|e| LifecycleError::Export(e.to_string()))?;
    for bucket in buckets {
        csv_writer
            .write_record([bucket.as_str()])
            .map_err(|e| LifecycleError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| LifecycleError::Export(e.to_string()))?;
    Ok(())
}

/// Save the distinct Glue bucket list to a file
pub fn save_glue_buckets_csv(buckets: &BTreeSet<String>, path: &Path) -> LifecycleResult<()> {
    if buckets.is_empty() {
        warn!("No buckets to save");
        return Ok(());
    }
    info!("Saving Glue buckets report to CSV file: {}", path.display());
    let mut file = File::create(path)
        .map_err(|e| LifecycleError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    write_glue_buckets_csv(buckets, &mut file)?;
    info!("Glue buckets report successfully saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expiration, LifecycleRule};

    #[test]
    fn test_policy_csv_header_order() {
        let records = vec![FlatPolicyRecord::no_rules("b1")];
        let mut out = Vec::new();
        write_policies_csv(&records, &mut out).unwrap();

        let csv_string = String::from_utf8(out).unwrap();
        let header = csv_string.lines().next().unwrap();
        assert_eq!(
            header,
            "Bucket,Status,ID,Prefix,Transitions,ExpirationDays,\
             NoncurrentVersionTransitions,NoncurrentVersionExpirationDays,\
             AbortIncompleteMultipartUploadDays"
        );
    }

    #[test]
    fn test_policy_csv_row() {
        let rule = LifecycleRule {
            status: Some("Enabled".into()),
            id: Some("r1".into()),
            expiration: Some(Expiration {
                days: Some(365),
                ..Default::default()
            }),
            ..Default::default()
        };
        let records = vec![FlatPolicyRecord::from_rule("b1", &rule)];
        let mut out = Vec::new();
        write_policies_csv(&records, &mut out).unwrap();

        let csv_string = String::from_utf8(out).unwrap();
        assert!(csv_string.contains("b1,Enabled,r1,No Prefix,N/A,365,N/A,N/A,N/A"));
    }

    #[test]
    fn test_policy_csv_quotes_joined_clauses() {
        let rule = LifecycleRule {
            transitions: Some(vec![
                crate::models::Transition {
                    days: Some(30),
                    storage_class: Some("GLACIER".into()),
                    ..Default::default()
                },
                crate::models::Transition {
                    days: Some(90),
                    storage_class: Some("DEEP_ARCHIVE".into()),
                    ..Default::default()
                },
            ]),
            ..Default::default()
        };
        let records = vec![FlatPolicyRecord::from_rule("b1", &rule)];
        let mut out = Vec::new();
        write_policies_csv(&records, &mut out).unwrap();

        let csv_string = String::from_utf8(out).unwrap();
        // The joined clause contains a comma, so it must be quoted.
        assert!(csv_string.contains("\"30 days to GLACIER, 90 days to DEEP_ARCHIVE\""));
    }

    #[test]
    fn test_glue_report_csv() {
        let records = vec![JobLogRecord {
            job_name: "etl".into(),
            bucket_name: "scripts".into(),
            continuous_logging_enabled: true,
            temporary_path: "s3://tmp/etl/".into(),
            spark_ui_enabled: false,
            spark_ui_logs_path: "N/A".into(),
        }];
        let mut out = Vec::new();
        write_glue_report_csv(&records, &mut out).unwrap();

        let csv_string = String::from_utf8(out).unwrap();
        assert!(csv_string.starts_with(
            "JobName,BucketName,ContinuousLoggingEnabled,TemporaryPath,\
             SparkUIEnabled,SparkUILogsPath"
        ));
        assert!(csv_string.contains("etl,scripts,true,s3://tmp/etl/,false,N/A"));
    }

    #[test]
    fn test_glue_buckets_csv() {
        let buckets: BTreeSet<String> = ["zeta", "alpha"].iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        write_glue_buckets_csv(&buckets, &mut out).unwrap();

        let csv_string = String::from_utf8(out).unwrap();
        assert_eq!(csv_string, "BucketName\nalpha\nzeta\n");
    }

    #[test]
    fn test_save_policies_skips_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("report.csv");
        save_policies_csv(&[], &path).unwrap();
        assert!(!path.exists());
    }
}
