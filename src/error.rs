//! Failures reported by the fallible capacity APIs.
//!
//! Lookups never fail: an absent key is reported through `end()` or a zero
//! count. Only configuration and growth can go wrong.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SetError {
    #[error("max load factor must be finite and within (0, 1], got {0}")]
    InvalidLoadFactor(f32),
    #[error("capacity overflow while growing the table to hold {requested} keys")]
    CapacityOverflow { requested: usize },
    #[error("failed to allocate a bucket array of {buckets} buckets")]
    AllocFailed { buckets: usize },
}

pub(crate) fn check_load_factor(max_load_factor: f32) -> Result<f32, SetError> {
    if max_load_factor.is_finite() && max_load_factor > 0.0 && max_load_factor <= 1.0 {
        Ok(max_load_factor)
    } else {
        Err(SetError::InvalidLoadFactor(max_load_factor))
    }
}
