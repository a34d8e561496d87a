//! Error types for the block pool resource.

use thiserror::Error;

use crate::framework::OwnershipError;

/// Errors that can occur during pool block operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    /// Every block is checked out.
    #[error("block pool exhausted: all {total} blocks are checked out")]
    Exhausted { total: usize },

    /// A write would run past the end of the block.
    #[error("write past end of block: end {end}, block size {block_size}")]
    BlockOverflow { end: usize, block_size: usize },

    /// Blocks were still checked out when the pool was torn down.
    #[error("{0} block(s) still checked out at teardown")]
    Outstanding(usize),

    /// An error surfaced from the ownership framework.
    #[error("ownership error: {0}")]
    Ownership(String),
}

impl From<OwnershipError> for PoolError {
    fn from(e: OwnershipError) -> Self {
        PoolError::Ownership(e.to_string())
    }
}
