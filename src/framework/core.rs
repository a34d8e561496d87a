//! # Core Ownership Framework
//!
//! This module defines the generic building blocks for resource ownership.
//!
//! ## Key Types
//!
//! - [`Resource`]: The trait that all resource types must implement.
//! - [`DuplicateResource`]: The optional trait for resources that can be deeply copied.
//! - [`Owned`]: The exclusive-ownership wrapper that manages one resource.
//! - [`OwnershipError`]: Common errors (e.g., Empty, StillShared).

use std::mem;
use tracing::{debug, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits)
// =============================================================================

/// Trait that any resource type must implement to be managed by [`Owned`].
///
/// # Architecture Note
/// Why do we need this trait?
/// By defining a contract (`Resource`) that all our resource types (TextBuffer,
/// ScratchFile, PoolBlock) must satisfy, we can write the ownership logic *once*
/// (acquire, transfer, release, exactly-once semantics) and reuse it everywhere.
///
/// We use "Associated Types" (`type Params`, `type Error`) to enforce type safety.
/// A `TextBuffer` is acquired from a `BufferSpec` and fails with a `BufferError`;
/// you can't accidentally acquire it from a `ScratchSpec`. The compiler prevents
/// this class of bugs entirely.
///
/// # Contract
/// - [`Resource::acquire`] either produces a fully initialized resource or fails
///   producing *nothing*. An implementation that grabs sub-resources before the
///   failure point must put them back before returning the error.
/// - [`Resource::release`] is called **exactly once** per live resource, by the
///   wrapper that owns it. Implementations are never called twice (the wrapper
///   guarantees that) and must not fail: release runs on drop paths where
///   there is nowhere to propagate an error.
pub trait Resource: Sized {
    /// The data required to acquire a new instance (DTO - Data Transfer Object).
    type Params;

    /// The error produced when acquisition or duplication fails.
    type Error: std::error::Error;

    /// Acquires the underlying resource. All-or-nothing: on error no resource
    /// exists and nothing leaks.
    fn acquire(params: Self::Params) -> Result<Self, Self::Error>;

    /// Gives the resource back (free the allocation, close and remove the file,
    /// return the block to its pool). Consumes the value: a released resource
    /// cannot be touched again.
    fn release(self);
}

/// Trait for resources that can produce an independent deep copy of themselves.
///
/// # Architecture Note
/// Duplication is deliberately *not* part of [`Resource`]. Some resources
/// fundamentally cannot be duplicated (an exclusive scratch file, a lock), and
/// for those the correct move is to reject copying **at compile time** rather
/// than at runtime. A type that implements `Resource` but not
/// `DuplicateResource` gets exactly that: [`Owned::try_clone`] and
/// [`Owned::assign_from`] simply do not exist for it, while move operations
/// keep working. See [`ScratchFile`](crate::domain::ScratchFile) for the
/// worked example.
pub trait DuplicateResource: Resource {
    /// Produces an independent duplicate of the underlying resource: a second
    /// resource, never a second handle to the same one. Mutating the duplicate
    /// must not affect the original.
    ///
    /// On failure, no duplicate exists and any sub-resources acquired along the
    /// way have been put back.
    fn try_duplicate(&self) -> Result<Self, Self::Error>;
}

// =============================================================================
// 2. ERRORS
// =============================================================================

/// Errors that can occur within the ownership framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OwnershipError {
    /// The wrapper holds no resource (it is default-constructed, moved-from, or
    /// already released).
    #[error("handle is empty (moved-from or released)")]
    Empty,
    /// Exclusive ownership was requested while other owners are still alive.
    #[error("resource is still shared by {0} other owner(s)")]
    StillShared(usize),
}

// =============================================================================
// 3. THE STAGE-THEN-COMMIT IDIOM
// =============================================================================

/// Stages a risky computation and only commits it into `slot` once it has
/// fully succeeded. Returns the displaced previous value for the caller to
/// dispose of.
///
/// # Architecture Note
/// This is the generalized form of "duplicate before release": any
/// state-replacing operation gets strong exception safety by building the
/// replacement *first*, in a fresh independent value, and swapping it into
/// place only when nothing can fail anymore. If `stage` errors, `slot` is
/// untouched.
///
/// [`Owned::assign_from`] is the canonical user, but the idiom applies to any
/// slot whose old value must survive a failed replacement.
pub fn stage_then_commit<T, E>(
    slot: &mut Option<T>,
    stage: impl FnOnce() -> Result<Option<T>, E>,
) -> Result<Option<T>, E> {
    let staged = stage()?;
    Ok(mem::replace(slot, staged))
}

// =============================================================================
// 4. THE EXCLUSIVE OWNERSHIP WRAPPER
// =============================================================================

/// Exclusive-ownership wrapper: owns at most one live resource and is the only
/// place that releases it.
///
/// # Architecture Note
/// This struct is the heart of the recipe. Its slot is an `Option<R>`:
/// `Some` means "owns exactly one live resource", `None` is the valid empty
/// state left behind by [`take`](Owned::take), [`release_now`](Owned::release_now)
/// or [`Owned::empty`]. Dropping an empty wrapper is a no-op, which is what
/// makes moved-from values safe to destroy: there is no double release because
/// the resource is gone from the source the moment it is transferred.
///
/// **Mutation points** (the only ways the owned resource changes hands):
/// - duplicate-on-copy: [`try_clone`](Owned::try_clone),
///   [`assign_from`](Owned::assign_from) (require [`DuplicateResource`])
/// - transfer-on-move: native moves, [`take`](Owned::take), [`adopt`](Owned::adopt)
/// - release-on-destroy: [`Drop`], [`release_now`](Owned::release_now)
pub struct Owned<R: Resource> {
    slot: Option<R>,
}

impl<R: Resource> Owned<R> {
    /// Acquires a resource and wraps it. On failure no wrapper is produced and
    /// nothing leaks (see the [`Resource::acquire`] contract).
    pub fn acquire(params: R::Params) -> Result<Self, R::Error> {
        match R::acquire(params) {
            Ok(resource) => {
                debug!(resource = short_type_name::<R>(), "Acquired");
                Ok(Self { slot: Some(resource) })
            }
            Err(e) => {
                warn!(resource = short_type_name::<R>(), error = %e, "Acquire failed");
                Err(e)
            }
        }
    }

    /// An empty wrapper. Equivalent to the moved-from state.
    pub fn empty() -> Self {
        Self { slot: None }
    }

    /// True when no resource is held.
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Borrows the resource, if any.
    pub fn get(&self) -> Option<&R> {
        self.slot.as_ref()
    }

    /// Mutably borrows the resource, if any.
    pub fn get_mut(&mut self) -> Option<&mut R> {
        self.slot.as_mut()
    }

    /// Transfers the resource out, leaving `self` empty.
    ///
    /// This is move construction spelled as a method: the returned wrapper
    /// holds exactly the resource `self` held, nothing was duplicated, and
    /// `self` is left in the valid empty state; its destructor stays safe to
    /// run and will release nothing.
    pub fn take(&mut self) -> Self {
        debug!(resource = short_type_name::<R>(), "Transferred out");
        Self { slot: self.slot.take() }
    }

    /// Move assignment: releases the current resource (if any) and takes
    /// ownership of `incoming`'s resource, leaving `incoming` empty.
    ///
    /// Never duplicates and never fails, so containers and callers can rely on
    /// it unconditionally.
    pub fn adopt(&mut self, mut incoming: Self) {
        let staged = incoming.slot.take();
        if let Some(old) = mem::replace(&mut self.slot, staged) {
            debug!(resource = short_type_name::<R>(), "Released (displaced by move)");
            old.release();
        }
    }

    /// Releases the resource now instead of waiting for drop. No-op when empty.
    pub fn release_now(&mut self) {
        if let Some(resource) = self.slot.take() {
            debug!(resource = short_type_name::<R>(), "Released");
            resource.release();
        }
    }

    /// Escape hatch: unwraps the raw resource. The caller takes over the
    /// release obligation; the wrapper's destructor will do nothing.
    pub fn into_inner(mut self) -> Option<R> {
        self.slot.take()
    }
}

impl<R: DuplicateResource> Owned<R> {
    /// Copy construction: produces a new, fully independent wrapper.
    ///
    /// Mutating the clone never affects the original and vice versa, because
    /// the underlying resource is deeply duplicated, never the handle. An
    /// empty wrapper clones to an empty wrapper. On failure no wrapper is
    /// produced and `self` is untouched.
    pub fn try_clone(&self) -> Result<Self, R::Error> {
        let slot = match &self.slot {
            Some(resource) => match resource.try_duplicate() {
                Ok(duplicate) => {
                    debug!(resource = short_type_name::<R>(), "Duplicated");
                    Some(duplicate)
                }
                Err(e) => {
                    warn!(resource = short_type_name::<R>(), error = %e, "Duplicate failed");
                    return Err(e);
                }
            },
            None => None,
        };
        Ok(Self { slot })
    }

    /// Copy assignment: replaces `self`'s state with an independent duplicate
    /// of `source`'s, leaving `source` unmodified.
    ///
    /// The order of operations is the whole point:
    ///
    /// 1. duplicate `source`'s resource into a staged value;
    /// 2. only then displace `self`'s current resource;
    /// 3. release the displaced resource.
    ///
    /// If duplication fails, `self` still holds its original resource,
    /// completely unchanged: strong exception safety by construction rather
    /// than by repair. No self-assignment check is needed: the borrow checker
    /// rejects the aliasing call outright, and for two handles with equal
    /// contents the duplicate-before-release order degenerates correctly.
    ///
    /// ```compile_fail
    /// use ownership_recipe::framework::Owned;
    /// use ownership_recipe::framework::probe::{Ledger, ProbeResource, ProbeSpec};
    ///
    /// let ledger = Ledger::new();
    /// let mut a = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "x")).unwrap();
    /// a.assign_from(&a); // E0502: `a` is already mutably borrowed
    /// ```
    pub fn assign_from(&mut self, source: &Self) -> Result<(), R::Error> {
        let displaced = stage_then_commit(&mut self.slot, || {
            source.slot.as_ref().map(R::try_duplicate).transpose()
        })?;
        if let Some(old) = displaced {
            debug!(resource = short_type_name::<R>(), "Released (displaced by assignment)");
            old.release();
        }
        Ok(())
    }
}

/// Release-on-destroy: the owned resource is released exactly once, on every
/// exit path. Dropping an empty or moved-from wrapper is a safe no-op.
impl<R: Resource> Drop for Owned<R> {
    fn drop(&mut self) {
        self.release_now();
    }
}

/// The default wrapper is empty, the same state a moved-from wrapper is in.
impl<R: Resource> Default for Owned<R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<R: Resource + std::fmt::Debug> std::fmt::Debug for Owned<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.slot {
            Some(resource) => f.debug_tuple("Owned").field(resource).finish(),
            None => f.write_str("Owned(<empty>)"),
        }
    }
}

/// Extracts just the type name (e.g., "TextBuffer" instead of
/// "ownership_recipe::domain::buffer::TextBuffer") for compact log fields.
pub(crate) fn short_type_name<R>() -> &'static str {
    std::any::type_name::<R>().split("::").last().unwrap_or("Unknown")
}
