//! AWS-SDK-backed implementations of the remote service traits
//!
//! The tool runs a single synchronous pass over buckets, so each client
//! owns a current-thread Tokio runtime and blocks on every SDK call rather
//! than exposing `async` to the core. Credentials and region come from the
//! default provider chain.

use aws_config::BehaviorVersion;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types as s3t;
use aws_smithy_types::date_time::Format;
use tokio::runtime::Runtime;

use crate::error::{LifecycleError, LifecycleResult};
use crate::models::{
    AbortIncompleteMultipartUpload, BucketSummary, Expiration, FilterAnd, FilterTag, JobDetail,
    LifecycleRule, NoncurrentVersionExpiration, NoncurrentVersionTransition, RuleFilter,
    Transition,
};
use crate::remote::{JobsApi, LifecycleFetchError, StorageApi};

/// S3 client implementing [`StorageApi`]
pub struct AwsStorageClient {
    client: aws_sdk_s3::Client,
    runtime: Runtime,
}

impl AwsStorageClient {
    /// Create a client using the default credential and region chain
    pub fn new() -> LifecycleResult<Self> {
        let runtime = build_runtime()?;
        let config = runtime.block_on(aws_config::defaults(BehaviorVersion::latest()).load());
        Ok(Self {
            client: aws_sdk_s3::Client::new(&config),
            runtime,
        })
    }
}

impl StorageApi for AwsStorageClient {
    fn list_buckets(&self) -> LifecycleResult<Vec<BucketSummary>> {
        let out = self
            .runtime
            .block_on(self.client.list_buckets().send())
            .map_err(|e| LifecycleError::Remote(DisplayErrorContext(&e).to_string()))?;

        Ok(out
            .buckets()
            .iter()
            .map(|b| BucketSummary {
                name: b.name().unwrap_or_default().to_string(),
                creation_date: b.creation_date().and_then(|d| d.fmt(Format::DateTime).ok()),
            })
            .collect())
    }

    fn get_lifecycle_configuration(
        &self,
        bucket: &str,
    ) -> Result<Vec<LifecycleRule>, LifecycleFetchError> {
        let result = self.runtime.block_on(
            self.client
                .get_bucket_lifecycle_configuration()
                .bucket(bucket)
                .send(),
        );

        match result {
            Ok(out) => Ok(out.rules().iter().map(from_sdk_rule).collect()),
            Err(err) => {
                let service = err.into_service_error();
                match service.meta().code() {
                    Some("NoSuchLifecycleConfiguration") => Err(LifecycleFetchError::NotConfigured),
                    Some("AccessDenied") => {
                        Err(LifecycleFetchError::AccessDenied(service.to_string()))
                    }
                    _ => Err(LifecycleFetchError::Other(service.to_string())),
                }
            }
        }
    }

    fn put_lifecycle_configuration(
        &self,
        bucket: &str,
        rules: &[LifecycleRule],
    ) -> LifecycleResult<()> {
        let sdk_rules = rules
            .iter()
            .map(to_sdk_rule)
            .collect::<LifecycleResult<Vec<_>>>()?;
        let config = s3t::BucketLifecycleConfiguration::builder()
            .set_rules(Some(sdk_rules))
            .build()
            .map_err(|e| LifecycleError::Remote(e.to_string()))?;

        self.runtime
            .block_on(
                self.client
                    .put_bucket_lifecycle_configuration()
                    .bucket(bucket)
                    .lifecycle_configuration(config)
                    .send(),
            )
            .map_err(|e| LifecycleError::RemoteWrite {
                bucket: bucket.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(())
    }
}

/// Glue client implementing [`JobsApi`]
pub struct AwsJobsClient {
    client: aws_sdk_glue::Client,
    runtime: Runtime,
}

impl AwsJobsClient {
    /// Create a client using the default credential and region chain
    pub fn new() -> LifecycleResult<Self> {
        let runtime = build_runtime()?;
        let config = runtime.block_on(aws_config::defaults(BehaviorVersion::latest()).load());
        Ok(Self {
            client: aws_sdk_glue::Client::new(&config),
            runtime,
        })
    }
}

impl JobsApi for AwsJobsClient {
    fn list_jobs(&self) -> LifecycleResult<Vec<JobDetail>> {
        let mut jobs = Vec::new();
        let mut next_token: Option<String> = None;
        loop {
            let out = self
                .runtime
                .block_on(self.client.get_jobs().set_next_token(next_token.take()).send())
                .map_err(|e| LifecycleError::Remote(DisplayErrorContext(&e).to_string()))?;

            for job in out.jobs() {
                jobs.push(JobDetail {
                    name: job.name().unwrap_or_default().to_string(),
                    script_location: job
                        .command()
                        .and_then(|c| c.script_location())
                        .map(str::to_string),
                    default_arguments: job.default_arguments().cloned().unwrap_or_default(),
                });
            }

            next_token = out.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }
        Ok(jobs)
    }
}

fn build_runtime() -> LifecycleResult<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LifecycleError::Config(format!("Failed to start async runtime: {}", e)))
}

// Top-level Prefix is deprecated in the SDK model but still occurs on old
// rule sets, so both mappings carry it.

#[allow(deprecated)]
fn from_sdk_rule(rule: &s3t::LifecycleRule) -> LifecycleRule {
    LifecycleRule {
        status: Some(rule.status().as_str().to_string()),
        id: rule.id().map(str::to_string),
        prefix: rule.prefix().map(str::to_string),
        filter: rule.filter().map(from_sdk_filter),
        transitions: none_if_empty(rule.transitions().iter().map(from_sdk_transition).collect()),
        expiration: rule.expiration().map(|e| Expiration {
            date: e.date().and_then(|d| d.fmt(Format::DateTime).ok()),
            days: e.days(),
            expired_object_delete_marker: e.expired_object_delete_marker(),
        }),
        noncurrent_version_transitions: none_if_empty(
            rule.noncurrent_version_transitions()
                .iter()
                .map(|t| NoncurrentVersionTransition {
                    noncurrent_days: t.noncurrent_days(),
                    storage_class: t.storage_class().map(|c| c.as_str().to_string()),
                    newer_noncurrent_versions: t.newer_noncurrent_versions(),
                })
                .collect(),
        ),
        noncurrent_version_expiration: rule.noncurrent_version_expiration().map(|e| {
            NoncurrentVersionExpiration {
                noncurrent_days: e.noncurrent_days(),
                newer_noncurrent_versions: e.newer_noncurrent_versions(),
            }
        }),
        abort_incomplete_multipart_upload: rule.abort_incomplete_multipart_upload().map(|a| {
            AbortIncompleteMultipartUpload {
                days_after_initiation: a.days_after_initiation(),
            }
        }),
    }
}

fn from_sdk_filter(filter: &s3t::LifecycleRuleFilter) -> RuleFilter {
    RuleFilter {
        prefix: filter.prefix().map(str::to_string),
        tag: filter.tag().map(from_sdk_tag),
        object_size_greater_than: filter.object_size_greater_than(),
        object_size_less_than: filter.object_size_less_than(),
        and: filter.and().map(|a| FilterAnd {
            prefix: a.prefix().map(str::to_string),
            tags: none_if_empty(a.tags().iter().map(from_sdk_tag).collect()),
            object_size_greater_than: a.object_size_greater_than(),
            object_size_less_than: a.object_size_less_than(),
        }),
    }
}

fn from_sdk_tag(tag: &s3t::Tag) -> FilterTag {
    FilterTag {
        key: tag.key().to_string(),
        value: tag.value().to_string(),
    }
}

fn from_sdk_transition(transition: &s3t::Transition) -> Transition {
    Transition {
        date: transition.date().and_then(|d| d.fmt(Format::DateTime).ok()),
        days: transition.days(),
        storage_class: transition.storage_class().map(|c| c.as_str().to_string()),
    }
}

#[allow(deprecated)]
fn to_sdk_rule(rule: &LifecycleRule) -> LifecycleResult<s3t::LifecycleRule> {
    let mut builder = s3t::LifecycleRule::builder()
        .status(s3t::ExpirationStatus::from(
            rule.status.as_deref().unwrap_or("Disabled"),
        ))
        .set_id(rule.id.clone())
        .set_prefix(rule.prefix.clone());

    if let Some(filter) = &rule.filter {
        builder = builder.filter(to_sdk_filter(filter)?);
    }
    if let Some(transitions) = &rule.transitions {
        builder = builder.set_transitions(Some(
            transitions
                .iter()
                .map(to_sdk_transition)
                .collect::<LifecycleResult<Vec<_>>>()?,
        ));
    }
    if let Some(expiration) = &rule.expiration {
        builder = builder.expiration(
            s3t::LifecycleExpiration::builder()
                .set_date(expiration.date.as_deref().map(parse_date).transpose()?)
                .set_days(expiration.days)
                .set_expired_object_delete_marker(expiration.expired_object_delete_marker)
                .build(),
        );
    }
    if let Some(transitions) = &rule.noncurrent_version_transitions {
        builder = builder.set_noncurrent_version_transitions(Some(
            transitions
                .iter()
                .map(|t| {
                    s3t::NoncurrentVersionTransition::builder()
                        .set_noncurrent_days(t.noncurrent_days)
                        .set_storage_class(
                            t.storage_class
                                .as_deref()
                                .map(s3t::TransitionStorageClass::from),
                        )
                        .set_newer_noncurrent_versions(t.newer_noncurrent_versions)
                        .build()
                })
                .collect(),
        ));
    }
    if let Some(expiration) = &rule.noncurrent_version_expiration {
        builder = builder.noncurrent_version_expiration(
            s3t::NoncurrentVersionExpiration::builder()
                .set_noncurrent_days(expiration.noncurrent_days)
                .set_newer_noncurrent_versions(expiration.newer_noncurrent_versions)
                .build(),
        );
    }
    if let Some(abort) = &rule.abort_incomplete_multipart_upload {
        builder = builder.abort_incomplete_multipart_upload(
            s3t::AbortIncompleteMultipartUpload::builder()
                .set_days_after_initiation(abort.days_after_initiation)
                .build(),
        );
    }

    builder
        .build()
        .map_err(|e| LifecycleError::Remote(e.to_string()))
}

fn to_sdk_filter(filter: &RuleFilter) -> LifecycleResult<s3t::LifecycleRuleFilter> {
    let mut builder = s3t::LifecycleRuleFilter::builder()
        .set_prefix(filter.prefix.clone())
        .set_object_size_greater_than(filter.object_size_greater_than)
        .set_object_size_less_than(filter.object_size_less_than);

    if let Some(tag) = &filter.tag {
        builder = builder.tag(to_sdk_tag(tag)?);
    }
    if let Some(and) = &filter.and {
        let mut and_builder = s3t::LifecycleRuleAndOperator::builder()
            .set_prefix(and.prefix.clone())
            .set_object_size_greater_than(and.object_size_greater_than)
            .set_object_size_less_than(and.object_size_less_than);
        if let Some(tags) = &and.tags {
            and_builder = and_builder.set_tags(Some(
                tags.iter()
                    .map(to_sdk_tag)
                    .collect::<LifecycleResult<Vec<_>>>()?,
            ));
        }
        builder = builder.and(and_builder.build());
    }

    Ok(builder.build())
}

fn to_sdk_tag(tag: &FilterTag) -> LifecycleResult<s3t::Tag> {
    s3t::Tag::builder()
        .key(&tag.key)
        .value(&tag.value)
        .build()
        .map_err(|e| LifecycleError::Remote(e.to_string()))
}

fn to_sdk_transition(transition: &Transition) -> LifecycleResult<s3t::Transition> {
    Ok(s3t::Transition::builder()
        .set_date(transition.date.as_deref().map(parse_date).transpose()?)
        .set_days(transition.days)
        .set_storage_class(
            transition
                .storage_class
                .as_deref()
                .map(s3t::TransitionStorageClass::from),
        )
        .build())
}

fn parse_date(date: &str) -> LifecycleResult<aws_smithy_types::DateTime> {
    aws_smithy_types::DateTime::from_str(date, Format::DateTime)
        .map_err(|e| LifecycleError::Remote(format!("Invalid date '{}': {}", date, e)))
}

fn none_if_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
