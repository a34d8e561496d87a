//! Error types for the scratch file resource.

use thiserror::Error;

use crate::framework::OwnershipError;

/// Errors that can occur during scratch file operations.
#[derive(Debug, Error)]
pub enum ScratchError {
    /// An underlying filesystem error.
    #[error("scratch file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// An error surfaced from the ownership framework.
    #[error("ownership error: {0}")]
    Ownership(String),
}

impl From<OwnershipError> for ScratchError {
    fn from(e: OwnershipError) -> Self {
        ScratchError::Ownership(e.to_string())
    }
}
