use tracing::{debug, instrument};

use crate::domain::{BlockCheckout, BlockPool, BlockRequest, PoolBlock};
use crate::framework::Owned;
use crate::pool_resource::PoolError;

use super::handle::Handle;

/// Handle for working with a [`PoolBlock`] checked out of a [`BlockPool`].
#[derive(Debug, Default)]
pub struct BlockHandle {
    inner: Owned<PoolBlock>,
}

impl Handle for BlockHandle {
    type Resource = PoolBlock;
    type Error = PoolError;

    fn owned(&self) -> &Owned<PoolBlock> {
        &self.inner
    }

    fn owned_mut(&mut self) -> &mut Owned<PoolBlock> {
        &mut self.inner
    }
}

impl BlockHandle {
    /// Checks a block out of the pool. Fails with
    /// [`PoolError::Exhausted`] when nothing is free.
    #[instrument(skip(pool))]
    pub fn checkout(pool: &BlockPool, request: BlockRequest) -> Result<Self, PoolError> {
        debug!(free = pool.free(), "Checking out block");
        Ok(Self {
            inner: Owned::acquire(BlockCheckout::new(pool, request))?,
        })
    }

    /// Copy construction: checks out a second block and copies the payload.
    /// Fails, taking nothing from the pool, when the pool is exhausted.
    #[instrument(skip(self))]
    pub fn try_clone(&self) -> Result<Self, PoolError> {
        Ok(Self {
            inner: self.inner.try_clone()?,
        })
    }

    /// Copy assignment: stages a duplicate of `source`'s block first, returns
    /// ours to the pool after. On failure this handle is unchanged.
    #[instrument(skip(self, source))]
    pub fn assign_from(&mut self, source: &BlockHandle) -> Result<(), PoolError> {
        self.inner.assign_from(&source.inner)
    }

    /// Move construction: transfers the block out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    // --- Domain operations, forwarded to the block ---

    pub fn id(&self) -> Result<u64, PoolError> {
        Ok(self.resource()?.id())
    }

    pub fn bytes(&self) -> Result<&[u8], PoolError> {
        Ok(self.resource()?.bytes())
    }

    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), PoolError> {
        self.resource_mut()?.write(offset, data)
    }

    pub fn fill(&mut self, byte: u8) -> Result<(), PoolError> {
        self.resource_mut()?.fill(byte);
        Ok(())
    }
}
