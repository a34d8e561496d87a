use serde::{Deserialize, Serialize};

use crate::buffer_resource::BufferError;

/// A heap-owned text buffer with a fixed capacity.
///
/// # Ownership Framework
/// This is the classic deep-copy example: the interesting state lives on the
/// heap, so a correct copy must duplicate the *contents*, not the handle. The
/// type implements [`Resource`](crate::framework::Resource) and
/// [`DuplicateResource`](crate::framework::DuplicateResource) (see
/// [`crate::buffer_resource`]) and is deliberately **not** `Clone`:
/// duplication goes through the framework so that every copy is accounted for.
#[derive(Debug, PartialEq, Eq)]
pub struct TextBuffer {
    contents: String,
    capacity: usize,
}

/// Payload for acquiring a new text buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferSpec {
    pub initial: String,
    pub capacity: usize,
}

impl BufferSpec {
    pub fn new(initial: impl Into<String>, capacity: usize) -> Self {
        Self {
            initial: initial.into(),
            capacity,
        }
    }
}

/// Payload for editing an existing buffer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BufferEdit {
    pub append: Option<String>,
    pub truncate_to: Option<usize>,
}

impl TextBuffer {
    /// Builds a buffer without capacity validation; [`Resource::acquire`]
    /// (in [`crate::buffer_resource`]) is the validated entry point.
    ///
    /// [`Resource::acquire`]: crate::framework::Resource::acquire
    pub(crate) fn new_unchecked(contents: String, capacity: usize) -> Self {
        Self { contents, capacity }
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends text. Fails without modifying the buffer when the result would
    /// exceed capacity.
    pub fn push_str(&mut self, text: &str) -> Result<(), BufferError> {
        let needed = self.contents.len() + text.len();
        if needed > self.capacity {
            return Err(BufferError::CapacityExceeded {
                needed,
                capacity: self.capacity,
            });
        }
        self.contents.push_str(text);
        Ok(())
    }

    /// Shortens the buffer to at most `len` bytes. No-op when already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.contents.len() {
            self.contents.truncate(len);
        }
    }

    /// Applies an edit payload.
    ///
    /// Order matters for all-or-nothing behavior: the append (the only part
    /// that can fail) runs first, so a rejected edit leaves the buffer
    /// untouched.
    pub fn apply(&mut self, edit: BufferEdit) -> Result<(), BufferError> {
        if let Some(text) = edit.append {
            self.push_str(&text)?;
        }
        if let Some(len) = edit.truncate_to {
            self.truncate(len);
        }
        Ok(())
    }
}
