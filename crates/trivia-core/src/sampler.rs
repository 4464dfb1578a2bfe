//! Random sampling without replacement.

use crate::error::{Result, TriviaError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick `count` distinct elements from `items`, in random order.
///
/// Elements are distinct by position: if the input contains duplicates, the
/// output may too, but no input slot is used twice. Asking for more elements
/// than the input holds is an [`TriviaError::InsufficientData`] error rather
/// than a short result.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Result<Vec<T>> {
    if count > items.len() {
        return Err(TriviaError::InsufficientData {
            required: count,
            available: items.len(),
        });
    }

    Ok(items.choose_multiple(rng, count).cloned().collect())
}
