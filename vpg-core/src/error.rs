//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum VpgError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),

    /// The minimum batch size in timesteps must be positive.
    #[error("min_batch_steps must be positive, got {0}")]
    InvalidMinBatchSteps(usize),

    /// The surrogate loss diverged to a non-finite value.
    #[error("non-finite loss: {0}")]
    NonFiniteLoss(f64),
}
