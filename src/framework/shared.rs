//! # Shared Ownership
//!
//! A reference-counted sharing discipline layered on top of [`Owned`].
//!
//! Exclusive ownership is the default in this recipe: no two live wrappers may
//! claim the same resource instance. When sharing genuinely is the design,
//! it must be *explicit*: release becomes reference-counted, and the resource
//! is freed only when the last owner is destroyed. [`Shared`] is that layer.
//!
//! Note what `Clone` means here versus on a duplicable resource: cloning a
//! [`Shared`] copies the *handle* (count bump, cheap), never the resource.
//! To get a private, independent copy out of a shared resource, use
//! [`Shared::detach`], which is copy-on-write spelled out.

use std::rc::Rc;
use tracing::debug;

use super::core::{short_type_name, DuplicateResource, Owned, OwnershipError, Resource};

/// A reference-counted handle to a resource held by an [`Owned`] wrapper.
///
/// # Architecture Note
/// The counting itself is not reimplemented here: `Rc` already is a correct
/// reference-counted owner, and `Owned` already releases exactly once on drop.
/// Composing the two *is* the implementation: the last `Shared` handle to go
/// away drops the `Rc`, which drops the `Owned`, which releases the resource.
/// Correctness by composition, with no custom drop logic in this file at all.
pub struct Shared<R: Resource> {
    inner: Rc<Owned<R>>,
}

impl<R: Resource> Shared<R> {
    /// Moves an exclusively-owned resource into the shared discipline.
    pub fn new(owned: Owned<R>) -> Self {
        debug!(resource = short_type_name::<R>(), "Entered shared ownership");
        Self { inner: Rc::new(owned) }
    }

    /// Acquires a resource directly into shared ownership.
    pub fn acquire(params: R::Params) -> Result<Self, R::Error> {
        Ok(Self::new(Owned::acquire(params)?))
    }

    /// Number of live owners of the underlying resource.
    pub fn owners(&self) -> usize {
        Rc::strong_count(&self.inner)
    }

    /// Borrows the resource, if any.
    pub fn get(&self) -> Option<&R> {
        self.inner.get()
    }

    /// True when the shared wrapper holds no resource.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Recovers exclusive ownership if this handle is the last owner;
    /// otherwise hands the still-shared handle back untouched.
    pub fn try_unwrap(self) -> Result<Owned<R>, Self> {
        Rc::try_unwrap(self.inner).map_err(|inner| Self { inner })
    }

    /// Gives up this handle's share and recovers exclusive ownership if it was
    /// the last one. On failure the share is released anyway and the remaining
    /// owner count is reported.
    pub fn unshare(self) -> Result<Owned<R>, OwnershipError> {
        let owners = Rc::strong_count(&self.inner);
        Rc::try_unwrap(self.inner).map_err(|_| OwnershipError::StillShared(owners - 1))
    }
}

impl<R: DuplicateResource> Shared<R> {
    /// Detaches an independent, exclusively-owned copy of the resource, the
    /// copy-on-write escape from shared state. The shared resource itself is
    /// untouched, even on failure.
    pub fn detach(&self) -> Result<Owned<R>, R::Error> {
        self.inner.try_clone()
    }
}

/// Copies the handle, not the resource. The owner count goes up by one; the
/// resource is released when the count reaches zero.
impl<R: Resource> Clone for Shared<R> {
    fn clone(&self) -> Self {
        debug!(
            resource = short_type_name::<R>(),
            owners = Rc::strong_count(&self.inner) + 1,
            "Shared handle copied"
        );
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<R: Resource + std::fmt::Debug> std::fmt::Debug for Shared<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("owners", &self.owners())
            .field("resource", &self.inner)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::probe::{Ledger, ProbeResource, ProbeSpec};

    #[test]
    fn last_owner_releases_exactly_once() {
        let ledger = Ledger::new();
        let shared = Shared::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "doc")).unwrap();
        let second = shared.clone();
        let third = second.clone();
        assert_eq!(third.owners(), 3);
        assert_eq!(ledger.live(), 1, "handle copies never duplicate the resource");

        drop(shared);
        drop(second);
        assert_eq!(ledger.live(), 1, "resource survives until the last owner");

        drop(third);
        ledger.verify();
    }

    #[test]
    fn try_unwrap_recovers_exclusive_ownership() {
        let ledger = Ledger::new();
        let shared = Shared::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "doc")).unwrap();
        let second = shared.clone();

        let shared = shared.try_unwrap().expect_err("two owners alive");
        drop(second);

        let owned = shared.try_unwrap().expect("sole owner now");
        assert_eq!(owned.get().unwrap().payload(), "doc");
        drop(owned);
        ledger.verify();
    }

    #[test]
    fn unshare_reports_remaining_owners_and_releases_the_share() {
        let ledger = Ledger::new();
        let shared = Shared::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "doc")).unwrap();
        let second = shared.clone();

        let err = shared.unshare().expect_err("two owners alive");
        assert_eq!(err, OwnershipError::StillShared(1));
        assert_eq!(second.owners(), 1, "failed unshare still gave the share up");
        drop(second);
        ledger.verify();
    }

    #[test]
    fn detach_produces_an_independent_copy() {
        let ledger = Ledger::new();
        let shared = Shared::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "original")).unwrap();
        let mut private = shared.detach().unwrap();
        assert_eq!(ledger.live(), 2);

        private.get_mut().unwrap().set_payload("rewritten");
        assert_eq!(shared.get().unwrap().payload(), "original");

        drop(private);
        drop(shared);
        ledger.verify();
    }
}
