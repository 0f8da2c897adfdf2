//! Engine types
//!
//! Resource descriptors, per-resource outcomes and run statistics.

use crate::error::Result;
use crate::types::RawRecord;
use async_trait::async_trait;
use std::fmt;

/// A zero-argument fetch of one resource collection
#[async_trait]
pub trait FetchOperation: Send + Sync {
    /// Fetch the collection
    async fn fetch(&self) -> Result<Vec<RawRecord>>;
}

/// Binding of a display name to its fetch operation
pub struct ResourceDescriptor {
    name: String,
    operation: Box<dyn FetchOperation>,
}

impl ResourceDescriptor {
    /// Create a descriptor
    pub fn new(name: impl Into<String>, operation: impl FetchOperation + 'static) -> Self {
        Self {
            name: name.into(),
            operation: Box::new(operation),
        }
    }

    /// Resource name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the fetch operation
    pub async fn fetch(&self) -> Result<Vec<RawRecord>> {
        self.operation.fetch().await
    }
}

impl fmt::Debug for ResourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Result of fetching one resource
#[derive(Debug)]
pub struct ResourceOutcome {
    /// Resource name
    pub name: String,
    /// Raw records, or the error that made the resource be skipped
    pub result: Result<Vec<RawRecord>>,
}

impl ResourceOutcome {
    /// Whether the fetch succeeded
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Statistics for a read run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Batches emitted
    pub resources_emitted: usize,
    /// Resources fetched successfully but empty
    pub resources_empty: usize,
    /// Resources whose fetch failed
    pub resources_failed: usize,
    /// Rows across all emitted batches
    pub rows_emitted: usize,
}

impl ReadStats {
    /// Resources attempted so far
    pub fn resources_seen(&self) -> usize {
        self.resources_emitted + self.resources_empty + self.resources_failed
    }
}

impl fmt::Display for ReadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} emitted, {} empty, {} failed, {} rows",
            self.resources_emitted, self.resources_empty, self.resources_failed, self.rows_emitted
        )
    }
}
