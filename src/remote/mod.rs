//! Remote service boundary
//!
//! Traits describing the storage and job services this tool consumes. The
//! core never talks to AWS directly: it goes through these traits, which
//! keeps every pass testable against an in-memory implementation. The
//! AWS-SDK-backed clients live in [`aws`].

pub mod aws;

use std::fmt;

use crate::error::LifecycleResult;
use crate::models::{BucketSummary, JobDetail, LifecycleRule};

/// Why a lifecycle configuration fetch did not return rules
///
/// Only `NotConfigured` and `AccessDenied` are intentionally downgraded to
/// "zero rules" by the caller; `Other` is downgraded too but logged louder.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleFetchError {
    /// The bucket has no lifecycle configuration at all
    NotConfigured,
    /// The caller is not allowed to read the configuration
    AccessDenied(String),
    /// Any other remote failure
    Other(String),
}

impl fmt::Display for LifecycleFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "no lifecycle configuration"),
            Self::AccessDenied(msg) => write!(f, "access denied: {}", msg),
            Self::Other(msg) => write!(f, "{}", msg),
        }
    }
}

/// The object-storage service, at the interface boundary this tool needs
pub trait StorageApi {
    /// List all buckets in the account
    fn list_buckets(&self) -> LifecycleResult<Vec<BucketSummary>>;

    /// Fetch the lifecycle rules configured on a bucket
    fn get_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<Vec<LifecycleRule>, LifecycleFetchError>;

    /// Replace the full lifecycle rule set on a bucket
    fn put_lifecycle_configuration(
        &self,
        bucket: &str,
        rules: &[LifecycleRule],
    ) -> LifecycleResult<()>;
}

/// The managed job service, as consumed by the log-path scanner
pub trait JobsApi {
    /// List all job definitions in the account
    fn list_jobs(&self) -> LifecycleResult<Vec<JobDetail>>;
}
