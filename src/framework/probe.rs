//! # Probe Framework
//!
//! Utilities for testing ownership behavior in isolation.
//!
//! Use [`Ledger::new`] to get an allocation ledger, acquire [`ProbeResource`]s
//! against it, then use helpers like [`Ledger::fail_next_duplicate`] to inject
//! failures and [`Ledger::verify`] to assert that every acquisition was matched
//! by exactly one release.
//!
//! # Example
//! ```
//! use ownership_recipe::framework::Owned;
//! use ownership_recipe::framework::probe::{Ledger, ProbeResource, ProbeSpec};
//!
//! let ledger = Ledger::new();
//! {
//!     let a = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "hello")).unwrap();
//!     let b = a.try_clone().unwrap();
//!     assert_eq!(ledger.live(), 2);
//!     drop(b);
//! }
//! ledger.verify(); // every serial acquired was released exactly once
//! ```

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::core::{DuplicateResource, Resource};

// =============================================================================
// THE LEDGER
// =============================================================================

/// Internal ledger state behind the shared cell.
#[derive(Debug, Default)]
struct LedgerState {
    next_serial: u64,
    live: BTreeSet<u64>,
    acquired: u64,
    released: u64,
    /// Remaining injected acquisition failures (consumed one per attempt).
    refuse_acquires: u32,
    /// Remaining injected duplication failures (consumed one per attempt).
    refuse_duplicates: u32,
}

/// Records every acquisition and release of [`ProbeResource`]s, with failure
/// injection for the exception-safety properties.
///
/// # Architecture Note
/// The ledger is the test double for "the outside world that hands out
/// resources". Every live probe carries a serial number; releasing a serial
/// that is not live **panics immediately**: a double release is a bug in the
/// ownership logic under test, not a condition to report politely. The same
/// philosophy as an expectation mock: violations fail the test at the point
/// of violation, and [`verify`](Ledger::verify) catches leaks at the end.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    state: Rc<RefCell<LedgerState>>,
}

impl Ledger {
    /// Creates a fresh ledger with no live resources and no injected failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live probe resources.
    pub fn live(&self) -> usize {
        self.state.borrow().live.len()
    }

    /// Total acquisitions (direct and via duplication) so far.
    pub fn acquired(&self) -> u64 {
        self.state.borrow().acquired
    }

    /// Total releases so far.
    pub fn released(&self) -> u64 {
        self.state.borrow().released
    }

    /// True if the given serial is currently live.
    pub fn is_live(&self, serial: u64) -> bool {
        self.state.borrow().live.contains(&serial)
    }

    /// Makes the next direct acquisition fail with [`ProbeError::AcquireRefused`].
    pub fn fail_next_acquire(&self) {
        self.state.borrow_mut().refuse_acquires += 1;
    }

    /// Makes the next duplication fail with [`ProbeError::DuplicateRefused`].
    pub fn fail_next_duplicate(&self) {
        self.state.borrow_mut().refuse_duplicates += 1;
    }

    /// Asserts the ledger is balanced: no live resources remain and every
    /// acquisition was matched by a release. Call at the end of a test.
    ///
    /// # Panics
    /// Panics with a description of the leaked serials or the count mismatch.
    pub fn verify(&self) {
        let state = self.state.borrow();
        assert!(
            state.live.is_empty(),
            "leaked probe resources, serials still live: {:?}",
            state.live
        );
        assert_eq!(
            state.acquired, state.released,
            "acquire/release mismatch: {} acquired, {} released",
            state.acquired, state.released
        );
    }

    fn register(&self) -> Result<u64, ProbeError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_acquires > 0 {
            state.refuse_acquires -= 1;
            return Err(ProbeError::AcquireRefused);
        }
        Ok(Self::admit(&mut state))
    }

    fn register_duplicate(&self) -> Result<u64, ProbeError> {
        let mut state = self.state.borrow_mut();
        if state.refuse_duplicates > 0 {
            state.refuse_duplicates -= 1;
            return Err(ProbeError::DuplicateRefused);
        }
        Ok(Self::admit(&mut state))
    }

    fn admit(state: &mut LedgerState) -> u64 {
        let serial = state.next_serial;
        state.next_serial += 1;
        state.acquired += 1;
        state.live.insert(serial);
        serial
    }

    fn retire(&self, serial: u64) {
        let mut state = self.state.borrow_mut();
        assert!(
            state.live.remove(&serial),
            "double release of probe serial {serial}"
        );
        state.released += 1;
    }
}

// =============================================================================
// THE PROBE RESOURCE
// =============================================================================

/// Errors injected by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// An acquisition was refused by [`Ledger::fail_next_acquire`].
    #[error("acquisition refused by ledger (injected failure)")]
    AcquireRefused,
    /// A duplication was refused by [`Ledger::fail_next_duplicate`].
    #[error("duplication refused by ledger (injected failure)")]
    DuplicateRefused,
}

/// Acquisition parameters for a [`ProbeResource`].
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    ledger: Ledger,
    payload: String,
}

impl ProbeSpec {
    pub fn new(ledger: &Ledger, payload: impl Into<String>) -> Self {
        Self {
            ledger: ledger.clone(),
            payload: payload.into(),
        }
    }
}

/// An instrumented resource: a serial number registered with a [`Ledger`] plus
/// a mutable text payload for independence checks.
#[derive(Debug)]
pub struct ProbeResource {
    ledger: Ledger,
    serial: u64,
    payload: String,
}

impl ProbeResource {
    /// The serial the ledger assigned at acquisition. Duplicates get fresh
    /// serials, so serial equality proves "this is the same resource instance".
    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn set_payload(&mut self, payload: impl Into<String>) {
        self.payload = payload.into();
    }
}

impl Resource for ProbeResource {
    type Params = ProbeSpec;
    type Error = ProbeError;

    fn acquire(params: ProbeSpec) -> Result<Self, ProbeError> {
        let serial = params.ledger.register()?;
        Ok(Self {
            ledger: params.ledger,
            serial,
            payload: params.payload,
        })
    }

    fn release(self) {
        self.ledger.retire(self.serial);
    }
}

impl DuplicateResource for ProbeResource {
    fn try_duplicate(&self) -> Result<Self, ProbeError> {
        let serial = self.ledger.register_duplicate()?;
        Ok(Self {
            ledger: self.ledger.clone(),
            serial,
            payload: self.payload.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Owned;

    #[test]
    fn ledger_tracks_serials_and_counts() {
        let ledger = Ledger::new();
        let a = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "a")).unwrap();
        let serial = a.get().unwrap().serial();
        assert!(ledger.is_live(serial));
        assert_eq!(ledger.acquired(), 1);

        drop(a);
        assert!(!ledger.is_live(serial));
        assert_eq!(ledger.released(), 1);
        ledger.verify();
    }

    #[test]
    fn injected_acquire_failure_produces_nothing() {
        let ledger = Ledger::new();
        ledger.fail_next_acquire();

        let refused = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "x"));
        assert_eq!(refused.err(), Some(ProbeError::AcquireRefused));
        ledger.verify();

        // The injection is consumed: the next attempt succeeds.
        let ok = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "x")).unwrap();
        drop(ok);
        ledger.verify();
    }

    #[test]
    #[should_panic(expected = "double release")]
    fn double_release_panics_at_the_point_of_violation() {
        let ledger = Ledger::new();
        let a = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "a")).unwrap();
        let serial = a.get().unwrap().serial();
        drop(a);
        ledger.retire(serial);
    }

    #[test]
    #[should_panic(expected = "leaked probe resources")]
    fn verify_catches_leaks() {
        let ledger = Ledger::new();
        let a = Owned::<ProbeResource>::acquire(ProbeSpec::new(&ledger, "a")).unwrap();
        let _raw = a.into_inner(); // deliberately escape the wrapper
        std::mem::forget(_raw);
        ledger.verify();
    }
}
