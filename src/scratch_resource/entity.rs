//! Resource trait implementation for the scratch file domain type.
//!
//! `ScratchFile` is the move-only resource of the recipe: it implements
//! [`Resource`] and deliberately not
//! [`DuplicateResource`](crate::framework::DuplicateResource). The negative
//! compilation tests below pin that down.
//!
//! Copy construction is rejected at compile time:
//!
//! ```compile_fail
//! use ownership_recipe::domain::{ScratchFile, ScratchSpec};
//! use ownership_recipe::framework::Owned;
//!
//! let file = Owned::<ScratchFile>::acquire(ScratchSpec::in_temp_dir("demo")).unwrap();
//! let copy = file.try_clone(); // ScratchFile: DuplicateResource is not satisfied
//! ```
//!
//! So is copy assignment:
//!
//! ```compile_fail
//! use ownership_recipe::domain::{ScratchFile, ScratchSpec};
//! use ownership_recipe::framework::Owned;
//!
//! let a = Owned::<ScratchFile>::acquire(ScratchSpec::in_temp_dir("demo")).unwrap();
//! let mut b = Owned::<ScratchFile>::empty();
//! b.assign_from(&a); // ScratchFile: DuplicateResource is not satisfied
//! ```
//!
//! Moves still work; exclusive transfer of the one file is meaningful:
//!
//! ```
//! use ownership_recipe::domain::{ScratchFile, ScratchSpec};
//! use ownership_recipe::framework::Owned;
//!
//! let mut a = Owned::<ScratchFile>::acquire(ScratchSpec::in_temp_dir("demo")).unwrap();
//! let b = a.take();
//! assert!(a.is_empty());
//! assert!(!b.is_empty());
//! ```

use std::fs::OpenOptions;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::domain::{ScratchFile, ScratchSpec};
use crate::framework::Resource;

use super::error::ScratchError;

/// Per-process counter so concurrent acquisitions never collide on a name.
static NEXT_SCRATCH: AtomicU64 = AtomicU64::new(1);

impl Resource for ScratchFile {
    type Params = ScratchSpec;
    type Error = ScratchError;

    /// Creates a uniquely named file under the spec's directory. `create_new`
    /// refuses to adopt a file that already exists, so the acquired resource
    /// is exclusively ours from the first instant.
    fn acquire(spec: ScratchSpec) -> Result<Self, ScratchError> {
        let name = format!(
            "{}-{}-{}.scratch",
            spec.prefix,
            process::id(),
            NEXT_SCRATCH.fetch_add(1, Ordering::SeqCst)
        );
        let path = spec.dir.join(name);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        Ok(ScratchFile {
            file,
            path,
            written: 0,
        })
    }

    /// Closes the handle, then removes the file. Removal failures are logged
    /// rather than propagated: release also runs on drop paths, where there is
    /// no caller to report to.
    fn release(self) {
        let ScratchFile { file, path, .. } = self;
        drop(file);
        if let Err(e) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "Failed to remove scratch file");
        }
    }
}
