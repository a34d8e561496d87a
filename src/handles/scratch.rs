use std::path::Path;

use tracing::{debug, instrument};

use crate::domain::{ScratchFile, ScratchSpec};
use crate::framework::Owned;
use crate::scratch_resource::ScratchError;

use super::handle::Handle;

/// Handle for working with an owned [`ScratchFile`].
///
/// Move-only: `ScratchFile` does not implement
/// [`DuplicateResource`](crate::framework::DuplicateResource), so this handle
/// has no `try_clone`/`assign_from`, and no `Clone`. Ownership of the file
/// changes hands by move ([`take`](ScratchHandle::take) /
/// [`adopt`](ScratchHandle::adopt)) or not at all.
#[derive(Debug, Default)]
pub struct ScratchHandle {
    inner: Owned<ScratchFile>,
}

impl Handle for ScratchHandle {
    type Resource = ScratchFile;
    type Error = ScratchError;

    fn owned(&self) -> &Owned<ScratchFile> {
        &self.inner
    }

    fn owned_mut(&mut self) -> &mut Owned<ScratchFile> {
        &mut self.inner
    }
}

impl ScratchHandle {
    /// Creates the backing file and wraps it.
    #[instrument]
    pub fn create(spec: ScratchSpec) -> Result<Self, ScratchError> {
        debug!("Creating scratch file");
        Ok(Self {
            inner: Owned::acquire(spec)?,
        })
    }

    /// Move construction: transfers the file out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    /// Move assignment: adopts `incoming`'s file, closing and removing the
    /// current one.
    pub fn adopt(&mut self, mut incoming: Self) {
        self.inner.adopt(incoming.inner.take());
    }

    // --- Domain operations, forwarded to the file ---

    pub fn path(&self) -> Result<&Path, ScratchError> {
        Ok(self.resource()?.path())
    }

    pub fn written(&self) -> Result<u64, ScratchError> {
        Ok(self.resource()?.written())
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), ScratchError> {
        self.resource_mut()?.append(bytes)
    }

    pub fn sync(&mut self) -> Result<(), ScratchError> {
        self.resource_mut()?.sync()
    }
}
