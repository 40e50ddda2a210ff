//! Bucket summaries returned by the listing call

use serde::{Deserialize, Serialize};

/// One bucket from the account listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
    /// Bucket name
    pub name: String,
    /// Creation timestamp as formatted by the provider, when known
    pub creation_date: Option<String>,
}

impl BucketSummary {
    /// Create a summary with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }
}
