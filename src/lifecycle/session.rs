use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument};

use crate::buffer_resource::BufferError;
use crate::domain::{BlockPool, BlockRequest, BufferSpec, ScratchSpec};
use crate::handles::{BlockHandle, Handle, ScratchHandle, TextHandle};
use crate::pool_resource::PoolError;
use crate::scratch_resource::ScratchError;

/// Configuration for a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub buffer: BufferSpec,
    pub scratch: ScratchSpec,
    pub pool_blocks: usize,
    pub block_size: usize,
}

/// Errors that can occur while assembling or tearing down a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("buffer setup failed: {0}")]
    Buffer(#[from] BufferError),

    #[error("scratch file setup failed: {0}")]
    Scratch(#[from] ScratchError),

    #[error("block pool setup failed: {0}")]
    Pool(#[from] PoolError),
}

/// A working session composed of one resource of each kind.
///
/// `Session` is responsible for:
/// - **Lifecycle Management**: acquiring every resource at start, releasing
///   every resource at shutdown
/// - **Partial-construction safety**: if a later acquisition in
///   [`start`](Session::start) fails, the members already acquired are plain
///   values going out of scope; they release themselves. No cleanup code, no
///   leak.
/// - **Deterministic teardown**: [`shutdown`](Session::shutdown) releases in
///   a stated order and verifies the pool came back whole. Plain `drop`
///   works too: members release themselves in declaration order, which is why
///   the block handle is declared before the pool it must return to.
#[derive(Debug)]
pub struct Session {
    block: BlockHandle,
    scratch: ScratchHandle,
    text: TextHandle,
    pool: BlockPool,
}

impl Session {
    /// Acquires every resource the session needs, in dependency order.
    #[instrument(skip(config))]
    pub fn start(config: SessionConfig) -> Result<Self, SessionError> {
        let pool = BlockPool::new(config.pool_blocks, config.block_size);
        let text = TextHandle::create(config.buffer)?;
        let scratch = ScratchHandle::create(config.scratch)?;
        let block = BlockHandle::checkout(&pool, BlockRequest::default())?;

        info!(
            pool_blocks = config.pool_blocks,
            block_size = config.block_size,
            "Session started"
        );
        Ok(Self {
            block,
            scratch,
            text,
            pool,
        })
    }

    pub fn text(&self) -> &TextHandle {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut TextHandle {
        &mut self.text
    }

    pub fn scratch(&self) -> &ScratchHandle {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut ScratchHandle {
        &mut self.scratch
    }

    pub fn block(&self) -> &BlockHandle {
        &self.block
    }

    pub fn block_mut(&mut self) -> &mut BlockHandle {
        &mut self.block
    }

    pub fn pool(&self) -> &BlockPool {
        &self.pool
    }

    /// Persists the current buffer contents: appends them to the scratch file
    /// and mirrors the leading bytes into the checked-out block.
    #[instrument(skip(self))]
    pub fn checkpoint(&mut self) -> Result<(), SessionError> {
        let contents = self.text.as_str()?.to_owned();
        self.scratch.append(contents.as_bytes())?;
        self.scratch.sync()?;

        let block_len = self.block.bytes()?.len();
        let head = &contents.as_bytes()[..contents.len().min(block_len)];
        self.block.write(0, head)?;

        info!(bytes = contents.len(), "Checkpoint written");
        Ok(())
    }

    /// Gracefully tears the session down.
    ///
    /// Releases the block first and verifies the pool is whole again, then
    /// releases the scratch file and the buffer. Returns an error if any
    /// blocks were left outstanding.
    pub fn shutdown(mut self) -> Result<(), SessionError> {
        info!("Shutting down session");

        self.block.release_now();
        let outstanding = self.pool.outstanding();
        if outstanding != 0 {
            return Err(SessionError::Pool(PoolError::Outstanding(outstanding)));
        }

        self.scratch.release_now();
        self.text.release_now();

        info!("Session shut down cleanly");
        Ok(())
    }
}
