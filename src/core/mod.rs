//! Core aggregation engine
//!
//! Turns a large list of independent remote lookups into a small number of
//! grouped executor calls, tolerating per-item and whole-batch failure
//! without losing result alignment.

pub mod aggregate;
pub mod chunk;


pub use aggregate::{AggregationConfig, Aggregator, BatchExecutor, CallResult};
pub use chunk::chunk;
