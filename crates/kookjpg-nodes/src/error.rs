//! Errors surfaced to the host.

use kookjpg_core::{CompressError, QualityError, SaveError, TensorError};
use thiserror::Error;

/// Any failure of a node invocation.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid quality: {0}")]
    Quality(#[from] QualityError),

    #[error("invalid image tensor: {0}")]
    Tensor(#[from] TensorError),

    #[error("JPEG compression failed: {0}")]
    Compress(#[from] CompressError),

    #[error("saving JPEG failed: {0}")]
    Save(#[from] SaveError),

    #[error("failed to serialize node output: {0}")]
    Payload(#[from] serde_json::Error),
}
