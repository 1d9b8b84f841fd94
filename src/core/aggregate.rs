//! Batched aggregation of remote lookups
//!
//! The aggregator drives chunked descriptor batches through an injected
//! [`BatchExecutor`], sequentially or with bounded concurrency, and
//! reassembles per-item results into a single sequence aligned with the
//! input. Failures degrade to a caller-supplied default instead of aborting:
//! an individual unresolved slot and a whole failed batch call are both
//! replaced by the default, so the caller always receives one value per
//! descriptor.

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use super::chunk::chunk;
use crate::utils::error::{CheckerError, Result};

/// Outcome of a single call within a batch.
///
/// `Unresolved` means the backend produced no answer for that slot. It is a
/// distinct state rather than an in-band sentinel so that a resolved value
/// equal to the configured default stays unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallResult<T> {
    /// The backend answered with a value
    Resolved(T),
    /// No value could be obtained for this slot
    Unresolved,
}

impl<T> CallResult<T> {
    /// Whether this slot carries a resolved value
    pub fn is_resolved(&self) -> bool {
        matches!(self, CallResult::Resolved(_))
    }
}

impl<T> From<Option<T>> for CallResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => CallResult::Resolved(v),
            None => CallResult::Unresolved,
        }
    }
}

/// Capability that resolves one batch of descriptors in a single round trip.
///
/// The returned vector must be index-aligned with `batch` and of the same
/// length. Returning `Err` signals that the batch call itself failed
/// (transport error, malformed response); the aggregator treats that as every
/// slot being unresolved and carries on with the remaining batches.
#[async_trait]
pub trait BatchExecutor<D, T>: Send + Sync
where
    D: Sync,
    T: Send,
{
    /// Execute one batch of descriptors
    async fn execute_batch(&self, batch: &[D]) -> Result<Vec<CallResult<T>>>;
}

/// Configuration for batched aggregation
#[derive(Debug, Clone)]
pub struct AggregationConfig<T> {
    /// Maximum descriptors per executor call (default: 50)
    pub chunk_size: usize,
    /// Value substituted for every unresolved slot
    pub default_value: T,
    /// Maximum batches in flight at once (default: 1, i.e. sequential)
    pub concurrency: usize,
    /// Timeout per batch call; on expiry the batch counts as failed
    pub timeout: Duration,
}

impl<T> AggregationConfig<T> {
    /// Create a config with the given default value and standard settings
    pub fn new(default_value: T) -> Self {
        Self {
            chunk_size: 50,
            default_value,
            concurrency: 1,
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the maximum descriptors per executor call
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the number of batches in flight at once
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the per-batch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Aggregator for batched, failure-tolerant remote lookups
pub struct Aggregator<T> {
    config: AggregationConfig<T>,
}

impl<T> Aggregator<T>
where
    T: Clone + Send + Sync,
{
    /// Create a new aggregator
    pub fn new(config: AggregationConfig<T>) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &AggregationConfig<T> {
        &self.config
    }

    /// Resolve every descriptor through the executor, one call per batch.
    ///
    /// The output has exactly one element per descriptor, in input order:
    /// the resolved value where the backend answered, the configured default
    /// everywhere else. A failed or timed-out batch call degrades that batch
    /// to defaults without affecting any other batch.
    ///
    /// Fails only with [`crate::CheckerError::InvalidConfiguration`] when the
    /// chunk size is zero; no executor call is issued in that case.
    pub async fn aggregate<D, E>(&self, descriptors: &[D], executor: &E) -> Result<Vec<T>>
    where
        D: Sync,
        E: BatchExecutor<D, T> + ?Sized,
    {
        let size = self.config.chunk_size;
        let timeout = self.config.timeout;
        let concurrency = self.config.concurrency.max(1);

        let batches: Vec<(usize, &[D])> = chunk(descriptors, size)?.enumerate().collect();

        let fetched: Vec<(usize, Vec<CallResult<T>>)> = stream::iter(batches)
            .map(|(index, batch)| async move {
                let outcome = match tokio::time::timeout(timeout, executor.execute_batch(batch))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(CheckerError::Timeout(format!(
                        "batch call exceeded {:?}",
                        timeout
                    ))),
                };
                let slots = match outcome {
                    Ok(slots) if slots.len() == batch.len() => slots,
                    Ok(slots) => {
                        warn!(
                            batch = index,
                            expected = batch.len(),
                            got = slots.len(),
                            "batch returned misaligned result count, treating as failed"
                        );
                        unresolved_batch(batch.len())
                    }
                    Err(err) => {
                        warn!(batch = index, error = %err, "batch call failed, substituting defaults");
                        unresolved_batch(batch.len())
                    }
                };
                (index, slots)
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        // Pre-sized, index-addressed slots: completion order cannot disturb
        // result-to-input alignment.
        let mut results: Vec<T> = vec![self.config.default_value.clone(); descriptors.len()];
        for (index, slots) in fetched {
            let start = index * size;
            for (offset, slot) in slots.into_iter().enumerate() {
                match slot {
                    CallResult::Resolved(value) => results[start + offset] = value,
                    CallResult::Unresolved => {
                        debug!(call = start + offset, "unresolved slot, using default");
                    }
                }
            }
        }

        Ok(results)
    }
}

fn unresolved_batch<T>(len: usize) -> Vec<CallResult<T>> {
    (0..len).map(|_| CallResult::Unresolved).collect()
}
