use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scratch_resource::ScratchError;

/// An exclusively-owned scratch file: created on acquisition, closed and
/// removed on release.
///
/// # Ownership Framework
/// This is the non-copyable resource of the recipe. There is no meaningful way
/// to duplicate "the open file at this path" (two owners would race to remove
/// it), so `ScratchFile` implements [`Resource`](crate::framework::Resource)
/// but *not* [`DuplicateResource`](crate::framework::DuplicateResource).
/// Copy attempts are rejected at compile time; transfer by move still works,
/// because handing the one file to a new owner is perfectly meaningful.
/// See [`crate::scratch_resource`] for the trait implementation and the
/// negative compilation tests.
#[derive(Debug)]
pub struct ScratchFile {
    pub(crate) file: File,
    pub(crate) path: PathBuf,
    pub(crate) written: u64,
}

/// Payload for acquiring a scratch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScratchSpec {
    /// Directory the file is created in.
    pub dir: PathBuf,
    /// Human-readable prefix for the generated file name.
    pub prefix: String,
}

impl ScratchSpec {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Spec targeting the system temp directory.
    pub fn in_temp_dir(prefix: impl Into<String>) -> Self {
        Self::new(std::env::temp_dir(), prefix)
    }
}

impl ScratchFile {
    /// Path of the backing file. Valid until release.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Appends bytes to the file.
    pub fn append(&mut self, bytes: &[u8]) -> Result<(), ScratchError> {
        self.file.write_all(bytes)?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Flushes buffered writes to the OS.
    pub fn sync(&mut self) -> Result<(), ScratchError> {
        self.file.sync_all()?;
        Ok(())
    }
}
