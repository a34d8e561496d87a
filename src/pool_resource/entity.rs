//! Resource trait implementations for the pool block domain type.
//!
//! A [`PoolBlock`] is acquired by checking a block out of its
//! [`BlockPool`](crate::domain::BlockPool) and released by checking it back
//! in. Duplication checks out a *second* block and copies the payload, which
//! means copying can genuinely fail, with [`PoolError::Exhausted`], when the
//! pool has nothing left to hand out.

use crate::domain::{BlockCheckout, PoolBlock};
use crate::framework::{DuplicateResource, Resource};

use super::error::PoolError;

impl Resource for PoolBlock {
    type Params = BlockCheckout;
    type Error = PoolError;

    fn acquire(params: BlockCheckout) -> Result<Self, PoolError> {
        let (id, block_size) = params.pool.checkout()?;
        Ok(PoolBlock {
            pool: params.pool,
            id,
            bytes: vec![params.request.fill; block_size],
        })
    }

    fn release(self) {
        self.pool.checkin(self.id);
    }
}

impl DuplicateResource for PoolBlock {
    /// Checks out a fresh block from the same pool and copies the payload.
    /// When the pool is exhausted no block is taken and nothing changes.
    fn try_duplicate(&self) -> Result<Self, PoolError> {
        let (id, _) = self.pool.checkout()?;
        Ok(PoolBlock {
            pool: self.pool.clone(),
            id,
            bytes: self.bytes.clone(),
        })
    }
}
