//! Core data models
//!
//! Serde representations of the provider-side lifecycle rule schema plus
//! the small summary types returned by the remote listing calls. JSON field
//! names mirror the provider schema exactly so backup files are a faithful
//! structural encoding of what the service returned.

pub mod bucket;
pub mod job;
pub mod rule;

pub use bucket::BucketSummary;
pub use job::JobDetail;
pub use rule::{
    AbortIncompleteMultipartUpload, Expiration, FilterAnd, FilterTag, LifecycleRule,
    NoncurrentVersionExpiration, NoncurrentVersionTransition, RuleFilter, Transition,
};
