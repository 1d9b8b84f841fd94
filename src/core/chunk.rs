//! Chunking of call descriptors
//!
//! Splits an ordered descriptor sequence into bounded-size batches while
//! preserving relative order across batch boundaries. Pure and restartable;
//! the returned iterator borrows the input and can be rebuilt at will.

use crate::utils::error::{CheckerError, Result};

/// Split `descriptors` into ordered chunks of at most `size` elements.
///
/// Every chunk except possibly the last has exactly `size` elements; the
/// chunks concatenated reproduce the input exactly. An empty input yields an
/// empty iterator.
///
/// Fails with [`CheckerError::InvalidConfiguration`] when `size` is zero.
pub fn chunk<D>(descriptors: &[D], size: usize) -> Result<impl Iterator<Item = &[D]> + '_> {
    if size == 0 {
        return Err(CheckerError::InvalidConfiguration(
            "chunk size must be at least 1".to_string(),
        ));
    }
    Ok(descriptors.chunks(size))
}
