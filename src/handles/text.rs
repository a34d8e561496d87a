use tracing::{debug, instrument};

use crate::buffer_resource::BufferError;
use crate::domain::{BufferEdit, BufferSpec, TextBuffer};
use crate::framework::Owned;

use super::handle::Handle;

/// Handle for working with an owned [`TextBuffer`].
#[derive(Debug, Default)]
pub struct TextHandle {
    inner: Owned<TextBuffer>,
}

impl Handle for TextHandle {
    type Resource = TextBuffer;
    type Error = BufferError;

    fn owned(&self) -> &Owned<TextBuffer> {
        &self.inner
    }

    fn owned_mut(&mut self) -> &mut Owned<TextBuffer> {
        &mut self.inner
    }
}

impl TextHandle {
    /// Acquires a fresh buffer per the spec.
    #[instrument]
    pub fn create(spec: BufferSpec) -> Result<Self, BufferError> {
        debug!("Acquiring text buffer");
        Ok(Self {
            inner: Owned::acquire(spec)?,
        })
    }

    /// Copy construction: an independent buffer with the same contents.
    #[instrument(skip(self))]
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        Ok(Self {
            inner: self.inner.try_clone()?,
        })
    }

    /// Copy assignment: duplicate `source`'s buffer first, release ours after.
    /// On failure this handle is unchanged.
    #[instrument(skip(self, source))]
    pub fn assign_from(&mut self, source: &TextHandle) -> Result<(), BufferError> {
        self.inner.assign_from(&source.inner)
    }

    /// Move construction: transfers the buffer out, leaving this handle empty.
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    /// Move assignment: adopts `incoming`'s buffer, releasing the current one.
    pub fn adopt(&mut self, mut incoming: Self) {
        self.inner.adopt(incoming.inner.take());
    }

    // --- Domain operations, forwarded to the buffer ---

    pub fn as_str(&self) -> Result<&str, BufferError> {
        Ok(self.resource()?.as_str())
    }

    pub fn len(&self) -> Result<usize, BufferError> {
        Ok(self.resource()?.len())
    }

    pub fn push_str(&mut self, text: &str) -> Result<(), BufferError> {
        self.resource_mut()?.push_str(text)
    }

    pub fn apply(&mut self, edit: BufferEdit) -> Result<(), BufferError> {
        self.resource_mut()?.apply(edit)
    }
}
