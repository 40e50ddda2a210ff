//! S3 lifecycle manager
//!
//! Inventories the lifecycle policies of S3 buckets, flattens them into a
//! CSV report, and persists/restores raw rule sets as per-bucket JSON
//! backups. A side feature scans AWS Glue job configuration to report
//! where temporary and Spark UI log artifacts are written.
//!
//! # Architecture
//!
//! - `config`: backup directory and report path resolution
//! - `error`: custom error types
//! - `models`: serde model of the provider rule schema
//! - `policy`: the rule normalizer producing flat report records
//! - `remote`: storage/job service traits and the AWS-backed clients
//! - `manager`: per-bucket inventory passes
//! - `backup`: backup export, restore and listing
//! - `jobs`: Glue job log-path scanner
//! - `export`: CSV report sinks
//! - `cli`: command handlers

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod jobs;
pub mod manager;
pub mod models;
pub mod policy;
pub mod remote;

pub use error::{LifecycleError, LifecycleResult};
