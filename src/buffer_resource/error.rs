//! Error types for the buffer resource.

use thiserror::Error;

use crate::framework::OwnershipError;

/// Errors that can occur during buffer operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BufferError {
    /// The operation would grow the buffer past its capacity.
    #[error("buffer capacity exceeded: needed {needed}, capacity {capacity}")]
    CapacityExceeded { needed: usize, capacity: usize },

    /// An error surfaced from the ownership framework.
    #[error("ownership error: {0}")]
    Ownership(String),
}

impl From<OwnershipError> for BufferError {
    fn from(e: OwnershipError) -> Self {
        BufferError::Ownership(e.to_string())
    }
}
