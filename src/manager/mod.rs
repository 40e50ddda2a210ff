//! Lifecycle inventory passes
//!
//! `LifecycleManager` drives one synchronous pass over a set of buckets:
//! fetching rule sets, flattening them for the report, and collecting the
//! raw rules for export. Results are returned to the caller instead of
//! accumulating on the manager, so a pass has no hidden cross-call state.

use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::error::LifecycleResult;
use crate::models::LifecycleRule;
use crate::policy::FlatPolicyRecord;
use crate::remote::{LifecycleFetchError, StorageApi};

/// Drives lifecycle inventory passes against a storage service
pub struct LifecycleManager<'a> {
    api: &'a dyn StorageApi,
}

impl<'a> LifecycleManager<'a> {
    /// Create a manager over a storage service
    pub fn new(api: &'a dyn StorageApi) -> Self {
        Self { api }
    }

    /// List the names of all buckets in the account
    pub fn bucket_names(&self) -> LifecycleResult<Vec<String>> {
        let buckets = self.api.list_buckets()?;
        info!("{} buckets found", buckets.len());
        Ok(buckets.into_iter().map(|b| b.name).collect())
    }

    /// Fetch a bucket's lifecycle rules, downgrading fetch failures to
    /// an empty rule set
    ///
    /// A bucket without a lifecycle configuration is the normal case and
    /// only logged at debug level; denied or otherwise failed reads are
    /// warned about, and the pass continues.
    pub fn rules_for_bucket(&self, bucket: &str) -> Vec<LifecycleRule> {
        match self.api.get_lifecycle_configuration(bucket) {
            Ok(rules) => rules,
            Err(LifecycleFetchError::NotConfigured) => {
                debug!("Bucket {} has no lifecycle configuration", bucket);
                Vec::new()
            }
            Err(err) => {
                warn!("Unable to get the lifecycle policy for bucket {}: {}", bucket, err);
                Vec::new()
            }
        }
    }

    /// Flatten the lifecycle rules of every named bucket into report records
    ///
    /// A bucket with zero rules contributes exactly one sentinel record;
    /// every rule of a configured bucket contributes one record.
    pub fn process_buckets(&self, bucket_names: &[String]) -> Vec<FlatPolicyRecord> {
        info!("Starting to process buckets for lifecycle policies");
        let mut records = Vec::new();
        for bucket in bucket_names {
            info!("Processing bucket: {}", bucket);
            let rules = self.rules_for_bucket(bucket);
            if rules.is_empty() {
                records.push(FlatPolicyRecord::no_rules(bucket));
            } else {
                records.extend(rules.iter().map(|r| FlatPolicyRecord::from_rule(bucket, r)));
            }
        }
        info!("Finished processing buckets for lifecycle policies");
        records
    }

    /// Collect the raw rule sets of every named bucket, keyed by bucket name
    ///
    /// The returned mapping is what `BackupManager::export_policies` takes;
    /// fetching and exporting stay orthogonal.
    pub fn fetch_policies(&self, bucket_names: &[String]) -> BTreeMap<String, Vec<LifecycleRule>> {
        bucket_names
            .iter()
            .map(|bucket| (bucket.clone(), self.rules_for_bucket(bucket)))
            .collect()
    }
}
