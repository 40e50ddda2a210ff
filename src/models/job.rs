//! Glue job details consumed by the log-path scanner

use std::collections::HashMap;

/// The subset of a Glue job definition the scanner needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobDetail {
    /// Job name
    pub name: String,
    /// S3 URI of the job script, e.g. `s3://bucket/scripts/etl.py`
    pub script_location: Option<String>,
    /// The job's default argument map (`--TempDir`, `--enable-spark-ui`, ...)
    pub default_arguments: HashMap<String, String>,
}

impl JobDetail {
    /// Create a job detail with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}
