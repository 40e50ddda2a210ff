//! Rule Normalizer
//!
//! Flattens a lifecycle rule into a fully populated tabular record for
//! reporting. Every field of the output is always present: absence in the
//! source rule maps to a defined default, independently per field, and the
//! conversion never fails.

use serde::Serialize;

use crate::models::{LifecycleRule, NoncurrentVersionTransition, Transition};

/// Placeholder for values absent from the source rule
pub const NOT_AVAILABLE: &str = "N/A";

/// One row of the lifecycle policy report
///
/// Serde renames match the CSV column headers, in the fixed report order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatPolicyRecord {
    #[serde(rename = "Bucket")]
    pub bucket: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Prefix")]
    pub prefix: String,
    #[serde(rename = "Transitions")]
    pub transitions: String,
    #[serde(rename = "ExpirationDays")]
    pub expiration_days: String,
    #[serde(rename = "NoncurrentVersionTransitions")]
    pub noncurrent_version_transitions: String,
    #[serde(rename = "NoncurrentVersionExpirationDays")]
    pub noncurrent_version_expiration_days: String,
    #[serde(rename = "AbortIncompleteMultipartUploadDays")]
    pub abort_incomplete_multipart_upload_days: String,
}

impl FlatPolicyRecord {
    /// Flatten a single rule for `bucket` into a report record
    pub fn from_rule(bucket: &str, rule: &LifecycleRule) -> Self {
        Self {
            bucket: bucket.to_string(),
            status: rule.status.clone().unwrap_or_else(|| "Unknown".to_string()),
            id: rule.id.clone().unwrap_or_else(|| "No ID".to_string()),
            prefix: render_prefix(rule),
            transitions: render_transitions(rule.transitions.as_deref().unwrap_or_default()),
            expiration_days: render_days(rule.expiration.as_ref().and_then(|e| e.days)),
            noncurrent_version_transitions: render_noncurrent_transitions(
                rule.noncurrent_version_transitions
                    .as_deref()
                    .unwrap_or_default(),
            ),
            noncurrent_version_expiration_days: render_days(
                rule.noncurrent_version_expiration
                    .as_ref()
                    .and_then(|e| e.noncurrent_days),
            ),
            abort_incomplete_multipart_upload_days: render_days(
                rule.abort_incomplete_multipart_upload
                    .as_ref()
                    .and_then(|a| a.days_after_initiation),
            ),
        }
    }

    /// The sentinel record for a bucket with no lifecycle configuration
    pub fn no_rules(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            status: "No Rules".to_string(),
            id: NOT_AVAILABLE.to_string(),
            prefix: NOT_AVAILABLE.to_string(),
            transitions: NOT_AVAILABLE.to_string(),
            expiration_days: NOT_AVAILABLE.to_string(),
            noncurrent_version_transitions: NOT_AVAILABLE.to_string(),
            noncurrent_version_expiration_days: NOT_AVAILABLE.to_string(),
            abort_incomplete_multipart_upload_days: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Render the filter prefix, with the tag condition appended when present
///
/// An absent or empty prefix always renders as "No Prefix", even when a tag
/// follows it.
fn render_prefix(rule: &LifecycleRule) -> String {
    let filter = rule.filter.as_ref();
    let mut prefix = match filter.and_then(|f| f.prefix.as_deref()) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => "No Prefix".to_string(),
    };
    if let Some(tag) = filter.and_then(|f| f.tag.as_ref()) {
        prefix.push_str(&format!(", Tag: {}={}", tag.key, tag.value));
    }
    prefix
}

/// Render a day count, or "N/A" when absent
fn render_days(days: Option<i32>) -> String {
    days.map(|d| d.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Render transition clauses joined with ", ", or "N/A" for an empty list
fn render_transitions(transitions: &[Transition]) -> String {
    render_clauses(
        transitions
            .iter()
            .map(|t| (t.days, t.storage_class.as_deref())),
    )
}

/// Same rendering as [`render_transitions`], keyed on `NoncurrentDays`
fn render_noncurrent_transitions(transitions: &[NoncurrentVersionTransition]) -> String {
    render_clauses(
        transitions
            .iter()
            .map(|t| (t.noncurrent_days, t.storage_class.as_deref())),
    )
}

fn render_clauses<'a>(entries: impl Iterator<Item = (Option<i32>, Option<&'a str>)>) -> String {
    let clauses: Vec<String> = entries
        .map(|(days, class)| {
            format!(
                "{} days to {}",
                render_days(days),
                class.unwrap_or(NOT_AVAILABLE)
            )
        })
        .collect();
    if clauses.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        clauses.join(", ")
    }
}
