//! Execution engine module
//!
//! Sequential fetch loop and batch stream.
//!
//! # Overview
//!
//! - `ResourceFetcher` - Ordered descriptor list; fetches one resource at a time
//! - `BatchReader` - Pull-based reader producing one `RowBatch` per call
//! - `BatchStream` - The same sequence as a `futures::Stream`
//!
//! A failed fetch is logged and the resource is skipped. A normalization
//! fault ends the run: the error is yielded once and the sequence stops.

mod types;

pub use types::{FetchOperation, ReadStats, ResourceDescriptor, ResourceOutcome};

use crate::error::{Error, Result};
use crate::normalize::{Normalizer, RowBatch};
use crate::types::RawRecord;
use futures::Stream;
use std::pin::Pin;
use std::time::Instant;
use tracing::{debug, error, info};

/// Type alias for the batch stream returned by [`BatchReader::into_stream`]
pub type BatchStream = Pin<Box<dyn Stream<Item = Result<RowBatch>> + Send>>;

/// Ordered list of resources to fetch
#[derive(Debug, Default)]
pub struct ResourceFetcher {
    descriptors: Vec<ResourceDescriptor>,
}

impl ResourceFetcher {
    /// Create a fetcher over descriptors in emission order
    pub fn new(descriptors: Vec<ResourceDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Resource names in emission order
    pub fn names(&self) -> Vec<&str> {
        self.descriptors.iter().map(ResourceDescriptor::name).collect()
    }

    /// Number of resources to fetch
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether there is nothing to fetch
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Keep only the named resources. Emission order stays the declared
    /// order, not the order of `names`.
    pub fn select(self, names: &[String]) -> Result<Self> {
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.descriptors.iter().any(|d| d.name() == n.as_str()))
        {
            return Err(Error::UnknownResource {
                name: unknown.clone(),
            });
        }

        let descriptors = self
            .descriptors
            .into_iter()
            .filter(|d| names.iter().any(|n| n == d.name()))
            .collect();
        Ok(Self { descriptors })
    }

    /// Fetch every resource in order, keeping each outcome
    pub async fn fetch_all(&self) -> Vec<ResourceOutcome> {
        let mut outcomes = Vec::with_capacity(self.descriptors.len());
        for descriptor in &self.descriptors {
            outcomes.push(ResourceOutcome {
                name: descriptor.name().to_string(),
                result: fetch_resource(descriptor).await,
            });
        }
        outcomes
    }

    /// Start a read run
    pub fn reader(self, normalizer: Normalizer) -> BatchReader {
        BatchReader {
            pending: self.descriptors.into_iter(),
            normalizer,
            stats: ReadStats::default(),
            started: Instant::now(),
            finished: false,
        }
    }
}

/// Fetch one resource, logging a failure with the resource name
async fn fetch_resource(descriptor: &ResourceDescriptor) -> Result<Vec<RawRecord>> {
    info!("Fetching {}", descriptor.name());
    let result = descriptor.fetch().await;
    match &result {
        Ok(records) => debug!("{}: fetched {} records", descriptor.name(), records.len()),
        Err(e) => error!("Error fetching {}: {}", descriptor.name(), e),
    }
    result
}

/// Pull-based reader over the batches of one run
#[derive(Debug)]
pub struct BatchReader {
    pending: std::vec::IntoIter<ResourceDescriptor>,
    normalizer: Normalizer,
    stats: ReadStats,
    started: Instant,
    finished: bool,
}

impl BatchReader {
    /// Produce the next batch, or `None` once every resource has been tried.
    ///
    /// Failed and empty resources are skipped without yielding anything.
    pub async fn next_batch(&mut self) -> Option<Result<RowBatch>> {
        if self.finished {
            return None;
        }

        while let Some(descriptor) = self.pending.next() {
            let Ok(records) = fetch_resource(&descriptor).await else {
                self.stats.resources_failed += 1;
                continue;
            };

            match self.normalizer.normalize(descriptor.name(), &records) {
                Ok(Some(batch)) => {
                    self.stats.resources_emitted += 1;
                    self.stats.rows_emitted += batch.expected_row_count;
                    return Some(Ok(batch));
                }
                Ok(None) => {
                    debug!("{}: no records, nothing emitted", descriptor.name());
                    self.stats.resources_empty += 1;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        self.finished = true;
        info!(
            "Read complete in {:?}: {}",
            self.started.elapsed(),
            self.stats
        );
        None
    }

    /// Statistics so far
    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }

    /// Drain the reader into a vector. Stops at the first fatal error.
    pub async fn collect_batches(mut self) -> Result<(Vec<RowBatch>, ReadStats)> {
        let mut batches = Vec::new();
        while let Some(batch) = self.next_batch().await {
            batches.push(batch?);
        }
        Ok((batches, self.stats))
    }

    /// Convert into a lazy stream
    pub fn into_stream(self) -> BatchStream {
        Box::pin(futures::stream::unfold(self, |mut reader| async move {
            let item = reader.next_batch().await?;
            Some((item, reader))
        }))
    }
}

#[cfg(test)]
mod tests;
