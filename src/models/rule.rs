//! Lifecycle rule schema
//!
//! Mirrors the S3 lifecycle configuration shape field for field. Every
//! optional field is skipped during serialization when absent, so a backup
//! file round-trips to exactly the structure the service returned: fields
//! the service omitted stay omitted.

use serde::{Deserialize, Serialize};

/// A single lifecycle rule as returned by the storage service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleRule {
    /// Whether the rule is currently applied ("Enabled" / "Disabled")
    #[serde(rename = "Status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Rule identifier
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Deprecated top-level prefix, still present on old rule sets
    #[serde(rename = "Prefix", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Object filter limiting which keys the rule applies to
    #[serde(rename = "Filter", skip_serializing_if = "Option::is_none")]
    pub filter: Option<RuleFilter>,

    /// Storage-class transitions for current object versions
    #[serde(rename = "Transitions", skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<Transition>>,

    /// Expiration of current object versions
    #[serde(rename = "Expiration", skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,

    /// Storage-class transitions for noncurrent object versions
    #[serde(
        rename = "NoncurrentVersionTransitions",
        skip_serializing_if = "Option::is_none"
    )]
    pub noncurrent_version_transitions: Option<Vec<NoncurrentVersionTransition>>,

    /// Expiration of noncurrent object versions
    #[serde(
        rename = "NoncurrentVersionExpiration",
        skip_serializing_if = "Option::is_none"
    )]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,

    /// Cleanup of incomplete multipart uploads
    #[serde(
        rename = "AbortIncompleteMultipartUpload",
        skip_serializing_if = "Option::is_none"
    )]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

/// Key filter attached to a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleFilter {
    #[serde(rename = "Prefix", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(rename = "Tag", skip_serializing_if = "Option::is_none")]
    pub tag: Option<FilterTag>,

    #[serde(rename = "ObjectSizeGreaterThan", skip_serializing_if = "Option::is_none")]
    pub object_size_greater_than: Option<i64>,

    #[serde(rename = "ObjectSizeLessThan", skip_serializing_if = "Option::is_none")]
    pub object_size_less_than: Option<i64>,

    /// Conjunction of several filter conditions
    #[serde(rename = "And", skip_serializing_if = "Option::is_none")]
    pub and: Option<FilterAnd>,
}

/// A key/value tag condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTag {
    #[serde(rename = "Key")]
    pub key: String,

    #[serde(rename = "Value")]
    pub value: String,
}

/// The `And` operator combining prefix, tags and size bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterAnd {
    #[serde(rename = "Prefix", skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(rename = "Tags", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<FilterTag>>,

    #[serde(rename = "ObjectSizeGreaterThan", skip_serializing_if = "Option::is_none")]
    pub object_size_greater_than: Option<i64>,

    #[serde(rename = "ObjectSizeLessThan", skip_serializing_if = "Option::is_none")]
    pub object_size_less_than: Option<i64>,
}

/// A storage-class transition for current versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "Date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(rename = "Days", skip_serializing_if = "Option::is_none")]
    pub days: Option<i32>,

    #[serde(rename = "StorageClass", skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

/// Expiration of current versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Expiration {
    #[serde(rename = "Date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(rename = "Days", skip_serializing_if = "Option::is_none")]
    pub days: Option<i32>,

    #[serde(
        rename = "ExpiredObjectDeleteMarker",
        skip_serializing_if = "Option::is_none"
    )]
    pub expired_object_delete_marker: Option<bool>,
}

/// A storage-class transition for noncurrent versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoncurrentVersionTransition {
    #[serde(rename = "NoncurrentDays", skip_serializing_if = "Option::is_none")]
    pub noncurrent_days: Option<i32>,

    #[serde(rename = "StorageClass", skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    #[serde(
        rename = "NewerNoncurrentVersions",
        skip_serializing_if = "Option::is_none"
    )]
    pub newer_noncurrent_versions: Option<i32>,
}

/// Expiration of noncurrent versions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoncurrentVersionExpiration {
    #[serde(rename = "NoncurrentDays", skip_serializing_if = "Option::is_none")]
    pub noncurrent_days: Option<i32>,

    #[serde(
        rename = "NewerNoncurrentVersions",
        skip_serializing_if = "Option::is_none"
    )]
    pub newer_noncurrent_versions: Option<i32>,
}

/// Cleanup of incomplete multipart uploads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbortIncompleteMultipartUpload {
    #[serde(rename = "DaysAfterInitiation", skip_serializing_if = "Option::is_none")]
    pub days_after_initiation: Option<i32>,
}
