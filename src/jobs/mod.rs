//! Glue job log-path scanner
//!
//! Reports where each Glue job writes temporary artifacts and Spark UI
//! logs, based on the job's default argument map, plus the distinct set of
//! buckets those jobs touch.

use std::collections::BTreeSet;

use log::info;
use serde::Serialize;

use crate::models::JobDetail;

const DEFAULT_PATH: &str = "N/A";

/// One row of the Glue jobs log-path report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobLogRecord {
    #[serde(rename = "JobName")]
    pub job_name: String,
    #[serde(rename = "BucketName")]
    pub bucket_name: String,
    #[serde(rename = "ContinuousLoggingEnabled")]
    pub continuous_logging_enabled: bool,
    #[serde(rename = "TemporaryPath")]
    pub temporary_path: String,
    #[serde(rename = "SparkUIEnabled")]
    pub spark_ui_enabled: bool,
    #[serde(rename = "SparkUILogsPath")]
    pub spark_ui_logs_path: String,
}

impl JobLogRecord {
    /// Extract the log-path details of one job
    pub fn from_job(job: &JobDetail) -> Self {
        let args = &job.default_arguments;
        Self {
            job_name: job.name.clone(),
            bucket_name: job
                .script_location
                .as_deref()
                .and_then(bucket_from_uri)
                .unwrap_or_default(),
            continuous_logging_enabled: flag_enabled(
                args.get("--enable-continuous-cloudwatch-log"),
            ),
            temporary_path: args
                .get("--TempDir")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PATH.to_string()),
            spark_ui_enabled: flag_enabled(args.get("--enable-spark-ui")),
            spark_ui_logs_path: args
                .get("--spark-event-logs-path")
                .cloned()
                .unwrap_or_else(|| DEFAULT_PATH.to_string()),
        }
    }
}

/// Scan all jobs into log-path records
pub fn scan_jobs(jobs: &[JobDetail]) -> Vec<JobLogRecord> {
    info!("Starting to process Glue jobs for log paths");
    let records: Vec<JobLogRecord> = jobs
        .iter()
        .map(|job| {
            info!("Processing job: {}", job.name);
            JobLogRecord::from_job(job)
        })
        .collect();
    info!("Finished processing Glue jobs for log paths");
    records
}

/// The distinct, sorted set of buckets named in the records
pub fn distinct_buckets(records: &[JobLogRecord]) -> BTreeSet<String> {
    records
        .iter()
        .filter(|r| !r.bucket_name.is_empty())
        .map(|r| r.bucket_name.clone())
        .collect()
}

/// Extract the bucket name from an `s3://bucket/key...` URI
fn bucket_from_uri(uri: &str) -> Option<String> {
    let bucket = uri.split('/').nth(2)?;
    if bucket.is_empty() {
        None
    } else {
        Some(bucket.to_string())
    }
}

fn flag_enabled(value: Option<&String>) -> bool {
    value.map(|v| v == "true").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn job(name: &str, script: Option<&str>, args: &[(&str, &str)]) -> JobDetail {
        JobDetail {
            name: name.to_string(),
            script_location: script.map(str::to_string),
            default_arguments: args
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_bucket_extraction() {
        assert_eq!(
            bucket_from_uri("s3://my-scripts/etl/job.py"),
            Some("my-scripts".to_string())
        );
        assert_eq!(bucket_from_uri("s3:///job.py"), None);
        assert_eq!(bucket_from_uri("job.py"), None);
    }

    #[test]
    fn test_record_defaults() {
        let record = JobLogRecord::from_job(&job("nightly", None, &[]));

        assert_eq!(record.job_name, "nightly");
        assert_eq!(record.bucket_name, "");
        assert!(!record.continuous_logging_enabled);
        assert_eq!(record.temporary_path, "N/A");
        assert!(!record.spark_ui_enabled);
        assert_eq!(record.spark_ui_logs_path, "N/A");
    }

    #[test]
    fn test_record_with_all_arguments() {
        let record = JobLogRecord::from_job(&job(
            "etl",
            Some("s3://scripts/etl.py"),
            &[
                ("--enable-continuous-cloudwatch-log", "true"),
                ("--TempDir", "s3://tmp/etl/"),
                ("--enable-spark-ui", "true"),
                ("--spark-event-logs-path", "s3://logs/spark/"),
            ],
        ));

        assert_eq!(record.bucket_name, "scripts");
        assert!(record.continuous_logging_enabled);
        assert_eq!(record.temporary_path, "s3://tmp/etl/");
        assert!(record.spark_ui_enabled);
        assert_eq!(record.spark_ui_logs_path, "s3://logs/spark/");
    }

    #[test]
    fn test_flag_requires_exact_true() {
        let record = JobLogRecord::from_job(&job(
            "etl",
            None,
            &[("--enable-spark-ui", "True")],
        ));
        assert!(!record.spark_ui_enabled);
    }

    #[test]
    fn test_distinct_buckets_sorted_and_deduplicated() {
        let records = scan_jobs(&[
            job("a", Some("s3://zeta/a.py"), &[]),
            job("b", Some("s3://alpha/b.py"), &[]),
            job("c", Some("s3://zeta/c.py"), &[]),
            job("d", None, &[]),
        ]);

        let buckets: Vec<String> = distinct_buckets(&records).into_iter().collect();
        assert_eq!(buckets, vec!["alpha", "zeta"]);
    }
}
