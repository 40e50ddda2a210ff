//! End-to-end pass over an in-memory storage service: report, export,
//! restore, and the failure paths between them.

use std::cell::RefCell;
use std::collections::HashMap;

use tempfile::TempDir;

use s3_lifecycle_manager::backup::BackupManager;
use s3_lifecycle_manager::error::{LifecycleError, LifecycleResult};
use s3_lifecycle_manager::manager::LifecycleManager;
use s3_lifecycle_manager::models::{
    BucketSummary, Expiration, FilterTag, LifecycleRule, RuleFilter, Transition,
};
use s3_lifecycle_manager::remote::{LifecycleFetchError, StorageApi};

/// In-memory storage service recording every lifecycle replacement
struct InMemoryStorage {
    buckets: Vec<String>,
    rules: HashMap<String, Vec<LifecycleRule>>,
    puts: RefCell<Vec<(String, Vec<LifecycleRule>)>>,
}

impl InMemoryStorage {
    fn new(buckets: &[(&str, Vec<LifecycleRule>)]) -> Self {
        Self {
            buckets: buckets.iter().map(|(name, _)| name.to_string()).collect(),
            rules: buckets
                .iter()
                .map(|(name, rules)| (name.to_string(), rules.clone()))
                .collect(),
            puts: RefCell::new(Vec::new()),
        }
    }
}

impl StorageApi for InMemoryStorage {
    fn list_buckets(&self) -> LifecycleResult<Vec<BucketSummary>> {
        Ok(self
            .buckets
            .iter()
            .map(|name| BucketSummary::named(name.clone()))
            .collect())
    }

    fn get_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<Vec<LifecycleRule>, LifecycleFetchError> {
        match self.rules.get(bucket) {
            Some(rules) if !rules.is_empty() => Ok(rules.clone()),
            _ => Err(LifecycleFetchError::NotConfigured),
        }
    }

    fn put_lifecycle_configuration(
        &self,
        bucket: &str,
        rules: &[LifecycleRule],
    ) -> LifecycleResult<()> {
        self.puts
            .borrow_mut()
            .push((bucket.to_string(), rules.to_vec()));
        Ok(())
    }
}

fn archive_rules() -> Vec<LifecycleRule> {
    vec![LifecycleRule {
        status: Some("Enabled".into()),
        id: Some("archive".into()),
        filter: Some(RuleFilter {
            prefix: Some("logs/".into()),
            tag: Some(FilterTag {
                key: "Environment".into(),
                value: "Production".into(),
            }),
            ..Default::default()
        }),
        transitions: Some(vec![Transition {
            days: Some(30),
            storage_class: Some("GLACIER".into()),
            ..Default::default()
        }]),
        expiration: Some(Expiration {
            days: Some(365),
            ..Default::default()
        }),
        ..Default::default()
    }]
}

#[test]
fn report_pass_emits_rule_rows_and_sentinels() {
    let storage = InMemoryStorage::new(&[("with-rules", archive_rules()), ("bare", Vec::new())]);
    let manager = LifecycleManager::new(&storage);

    let bucket_names = manager.bucket_names().unwrap();
    let records = manager.process_buckets(&bucket_names);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].bucket, "with-rules");
    assert_eq!(records[0].status, "Enabled");
    assert_eq!(records[0].prefix, "logs/, Tag: Environment=Production");
    assert_eq!(records[0].transitions, "30 days to GLACIER");
    assert_eq!(records[1].bucket, "bare");
    assert_eq!(records[1].status, "No Rules");
}

#[test]
fn export_then_restore_replays_identical_rules() {
    let storage = InMemoryStorage::new(&[("with-rules", archive_rules()), ("bare", Vec::new())]);
    let manager = LifecycleManager::new(&storage);
    let temp_dir = TempDir::new().unwrap();
    let backup_manager = BackupManager::new(temp_dir.path()).unwrap();

    let bucket_names = manager.bucket_names().unwrap();
    let policies = manager.fetch_policies(&bucket_names);
    backup_manager.export_policies(&policies).unwrap();

    // Only the configured bucket produced a backup file.
    assert_eq!(
        backup_manager.list_backups().unwrap(),
        vec!["with-rules_lifecycle_backup.json"]
    );

    backup_manager.restore(&storage, "with-rules").unwrap();

    let puts = storage.puts.borrow();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].0, "with-rules");
    assert_eq!(puts[0].1, archive_rules());
}

#[test]
fn re_export_is_byte_identical() {
    let storage = InMemoryStorage::new(&[("with-rules", archive_rules())]);
    let manager = LifecycleManager::new(&storage);
    let temp_dir = TempDir::new().unwrap();
    let backup_manager = BackupManager::new(temp_dir.path()).unwrap();

    let policies = manager.fetch_policies(&["with-rules".to_string()]);
    backup_manager.export_policies(&policies).unwrap();
    let first = std::fs::read(backup_manager.backup_path("with-rules")).unwrap();

    backup_manager.export_policies(&policies).unwrap();
    let second = std::fs::read(backup_manager.backup_path("with-rules")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn restore_of_unknown_bucket_makes_no_remote_calls() {
    let storage = InMemoryStorage::new(&[("with-rules", archive_rules())]);
    let temp_dir = TempDir::new().unwrap();
    let backup_manager = BackupManager::new(temp_dir.path()).unwrap();

    let err = backup_manager.restore(&storage, "missing-bucket").unwrap_err();

    assert!(matches!(err, LifecycleError::BackupMissing { .. }));
    assert!(storage.puts.borrow().is_empty());
}

#[test]
fn backup_file_mirrors_provider_field_names() {
    let storage = InMemoryStorage::new(&[("with-rules", archive_rules())]);
    let manager = LifecycleManager::new(&storage);
    let temp_dir = TempDir::new().unwrap();
    let backup_manager = BackupManager::new(temp_dir.path()).unwrap();

    let policies = manager.fetch_policies(&["with-rules".to_string()]);
    backup_manager.export_policies(&policies).unwrap();

    let contents =
        std::fs::read_to_string(backup_manager.backup_path("with-rules")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert!(value.is_array());
    assert_eq!(value[0]["ID"], "archive");
    assert_eq!(value[0]["Filter"]["Tag"]["Key"], "Environment");
    assert_eq!(value[0]["Expiration"]["Days"], 365);
}
