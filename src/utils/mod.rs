//! Shared utilities
//!
//! Error types and logging setup used throughout the checker.

pub mod error;
pub mod logging;

pub use error::{CheckerError, Result};
