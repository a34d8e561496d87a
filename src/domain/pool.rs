use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::pool_resource::PoolError;

/// A bounded allocator of fixed-size blocks.
///
/// # Ownership Framework
/// The pool gives the recipe a resource whose duplication can *actually* fail:
/// copying a [`PoolBlock`] checks out another block, and when the pool is
/// exhausted the copy is refused: a real allocation failure, observable
/// without any mocking. Releasing a block returns it to the pool. The
/// mechanics mirror a stock counter: reserve on checkout, restore on checkin.
///
/// Cloning a `BlockPool` copies a handle to the same pool (all clones see the
/// same counters); the blocks themselves are the owned resources.
#[derive(Clone, Default)]
pub struct BlockPool {
    state: Rc<RefCell<PoolState>>,
}

#[derive(Debug, Default)]
struct PoolState {
    block_size: usize,
    total: usize,
    next_id: u64,
    checked_out: BTreeSet<u64>,
}

/// Payload describing the block to check out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockRequest {
    /// Byte the block is initially filled with.
    pub fill: u8,
}

/// Acquisition parameters for a [`PoolBlock`]: which pool, and what to fill
/// the block with.
#[derive(Debug, Clone)]
pub struct BlockCheckout {
    pub pool: BlockPool,
    pub request: BlockRequest,
}

impl BlockCheckout {
    pub fn new(pool: &BlockPool, request: BlockRequest) -> Self {
        Self {
            pool: pool.clone(),
            request,
        }
    }
}

impl BlockPool {
    /// Creates a pool of `total` blocks of `block_size` bytes each.
    pub fn new(total: usize, block_size: usize) -> Self {
        Self {
            state: Rc::new(RefCell::new(PoolState {
                block_size,
                total,
                next_id: 0,
                checked_out: BTreeSet::new(),
            })),
        }
    }

    /// Blocks currently available.
    pub fn free(&self) -> usize {
        let state = self.state.borrow();
        state.total - state.checked_out.len()
    }

    /// Blocks currently checked out.
    pub fn outstanding(&self) -> usize {
        self.state.borrow().checked_out.len()
    }

    /// Size of each block in bytes.
    pub fn block_size(&self) -> usize {
        self.state.borrow().block_size
    }

    pub(crate) fn checkout(&self) -> Result<(u64, usize), PoolError> {
        let mut state = self.state.borrow_mut();
        if state.checked_out.len() >= state.total {
            return Err(PoolError::Exhausted { total: state.total });
        }
        let id = state.next_id;
        state.next_id += 1;
        state.checked_out.insert(id);
        Ok((id, state.block_size))
    }

    pub(crate) fn checkin(&self, id: u64) {
        let mut state = self.state.borrow_mut();
        if !state.checked_out.remove(&id) {
            // The Owned wrapper makes this unreachable; a pool handle misused
            // outside the framework still must not corrupt the counters.
            warn!(id, "Check-in of a block that was not outstanding");
        }
    }
}

impl std::fmt::Debug for BlockPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("BlockPool")
            .field("total", &state.total)
            .field("outstanding", &state.checked_out.len())
            .field("block_size", &state.block_size)
            .finish()
    }
}

/// A fixed-size block checked out of a [`BlockPool`].
#[derive(Debug)]
pub struct PoolBlock {
    pub(crate) pool: BlockPool,
    pub(crate) id: u64,
    pub(crate) bytes: Vec<u8>,
}

impl PoolBlock {
    /// Pool-assigned block id. Duplicates get fresh ids.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Overwrites the block starting at `offset`. Fails without modifying the
    /// block when the data would run past the end.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), PoolError> {
        let end = offset + data.len();
        if end > self.bytes.len() {
            return Err(PoolError::BlockOverflow {
                end,
                block_size: self.bytes.len(),
            });
        }
        self.bytes[offset..end].copy_from_slice(data);
        Ok(())
    }

    /// Fills the whole block with one byte.
    pub fn fill(&mut self, byte: u8) {
        self.bytes.fill(byte);
    }
}
