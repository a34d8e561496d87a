//! Resource trait implementations for the buffer domain type.
//!
//! This module contains the [`Resource`] and [`DuplicateResource`]
//! implementations that enable [`TextBuffer`] to be managed by
//! [`Owned`](crate::framework::Owned).

use crate::domain::{BufferSpec, TextBuffer};
use crate::framework::{DuplicateResource, Resource};

use super::error::BufferError;

impl Resource for TextBuffer {
    type Params = BufferSpec;
    type Error = BufferError;

    /// Validates the spec and allocates the buffer. Initial contents beyond
    /// capacity are rejected before anything is built.
    fn acquire(spec: BufferSpec) -> Result<Self, BufferError> {
        if spec.initial.len() > spec.capacity {
            return Err(BufferError::CapacityExceeded {
                needed: spec.initial.len(),
                capacity: spec.capacity,
            });
        }
        Ok(TextBuffer::new_unchecked(spec.initial, spec.capacity))
    }

    /// The heap storage frees itself when the value drops; there is nothing
    /// external to give back.
    fn release(self) {}
}

impl DuplicateResource for TextBuffer {
    /// A full, independent copy of the contents, never a second handle to
    /// the same allocation.
    fn try_duplicate(&self) -> Result<Self, BufferError> {
        Ok(TextBuffer::new_unchecked(
            self.as_str().to_owned(),
            self.capacity(),
        ))
    }
}
