//! # Observability & Tracing
//!
//! This module provides the tracing infrastructure for the crate.
//!
//! ## What Gets Traced
//!
//! - **Resource Lifecycle**: every acquire, duplicate, transfer, and release,
//!   tagged with the resource type (`resource = "TextBuffer"`)
//! - **Handle Operations**: spans around create/clone/assign on the typed
//!   handles
//! - **Session Lifecycle**: start, checkpoint, and shutdown
//! - **Errors**: refused acquisitions and duplications, with the failure reason
//!
//! ## Usage
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test -- --nocapture
//!
//! # Show every ownership transition
//! RUST_LOG=debug cargo test -- --nocapture
//!
//! # Filter to the framework only
//! RUST_LOG=ownership_recipe::framework=debug cargo test -- --nocapture
//! ```
//!
//! With `RUST_LOG=debug` a copy assignment reads like this:
//!
//! ```text
//! DEBUG Duplicated resource="PoolBlock"
//! DEBUG Released (displaced by assignment) resource="PoolBlock"
//! ```
//!
//! The duplicate lands before the displaced resource is released, which is
//! the ordering the whole recipe is built around.

/// Initializes structured logging with the `tracing` crate.
///
/// Uses a compact format that hides the crate/module prefix
/// (`with_target(false)`); the `resource` field on each event carries the
/// interesting context. Log levels come from `RUST_LOG`.
///
/// Safe to call more than once (tests share one process); only the first call
/// installs the subscriber.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
