//! Generic ownership framework for resource-owning value types.
//!
//! This module provides the core building blocks for types that acquire an
//! externally-managed resource and must define consistent copy, move, and
//! destroy semantics for it.
//!
//! # Main Components
//!
//! - [`Resource`] - Trait that resource types implement to be managed by the framework
//! - [`DuplicateResource`] - Opt-in trait for resources that can be deeply copied
//! - [`Owned`] - Exclusive-ownership wrapper (duplicate-on-copy, transfer-on-move, release-on-destroy)
//! - [`Shared`] - Reference-counted sharing discipline layered on top of [`Owned`]
//! - [`OwnershipError`] - Common error types
//!
//! # Testing
//!
//! See the [`probe`] module for an instrumented resource and allocation ledger
//! to test ownership behavior without real resources.

pub mod core;
pub mod probe;
pub mod shared;

// Re-export core types for convenience
pub use self::core::{stage_then_commit, DuplicateResource, Owned, OwnershipError, Resource};
pub use self::shared::Shared;
