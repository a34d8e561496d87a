#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Ownership Recipe
//!
//! > **A Recipe for Resource-owning Value Types in Rust.**
//!
//! This crate demonstrates a pattern for building value types that own an
//! externally-managed resource (heap memory, a file, a pooled block) with
//! consistent copy, move, and destroy semantics. One generic wrapper carries
//! the rules; concrete resources plug into it through a small trait.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One invariant, enforced in one place
//!
//! A resource handle is either valid (owns exactly one live resource) or
//! empty. No two live owners may claim the same resource instance unless they
//! opted into an explicit sharing discipline. Everything in this crate exists
//! to make those two sentences hold:
//!
//! - **Duplicate-on-copy**: copying produces an independent duplicate of the
//!   resource, never a second handle to the same one.
//! - **Transfer-on-move**: moving hands the resource over without duplicating
//!   it, leaving the source empty and safe to destroy.
//! - **Release-on-destroy**: the resource is released exactly once, on every
//!   exit path, and releasing an empty handle is a no-op.
//!
//! ### Generics: The Power of `R`
//!
//! You'll see `Owned<R: Resource>` everywhere. This means "I can own
//! *anything*, as long as it behaves like a Resource."
//! - **Benefit**: The acquire/copy/move/release logic is written **once** and
//!   works for text buffers, scratch files, and pool blocks alike.
//! - **Trade-off**: Concrete code wants concrete verbs, which is what the
//!   [`handles`] layer adds back on top.
//!
//! ### Failing without damage
//!
//! Copy assignment stages the duplicate *before* releasing the target's
//! current resource. If duplication fails, the target is untouched: strong
//! exception safety falls out of the ordering, not out of a repair step. The
//! same ordering makes self-assignment a non-issue. See
//! [`framework::stage_then_commit`].
//!
//! ### Saying no at compile time
//!
//! Resources that cannot be duplicated (an exclusive scratch file) simply do
//! not implement [`framework::DuplicateResource`], so copy operations on
//! them *do not exist*. The mistake is rejected by the compiler, not detected
//! at runtime. Moves keep working.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each resource defines its own error type (e.g., `BufferError`,
//! `PoolError`) that implements `std::error::Error`. The `#[from]` attribute
//! provides automatic conversion where one layer wraps another
//! (`SessionError`).
//!
//! ### 2. Observability
//! We use `tracing` with structured fields on every ownership transition
//! (acquire, duplicate, transfer, release), so a test run with
//! `RUST_LOG=debug` narrates the life of every resource. See
//! [`lifecycle::tracing`].
//!
//! ### 3. Sharing is opt-in, not accidental
//! [`framework::Shared`] layers reference counting on top of exclusive
//! ownership: handle copies bump a count, and the resource is released by
//! whichever owner drops last. Nothing else in the crate shares anything.
//!
//! ## 🗺️ Module Tour
//!
//! The codebase is organized into four main layers. Here is your map:
//!
//! ### 1. The Engine ([`framework`])
//! The generic core: the [`Resource`](framework::Resource) contract, the
//! [`Owned`](framework::Owned) wrapper that enforces the ownership rules, the
//! [`Shared`](framework::Shared) counting layer, and the
//! [`probe`](framework::probe) instrumentation for tests.
//!
//! ### 2. The Implementation ([`domain`], `*_resource`)
//! Concrete resources built with the recipe: [`TextBuffer`](domain::TextBuffer)
//! (duplicable heap text), [`ScratchFile`](domain::ScratchFile) (move-only
//! file), [`PoolBlock`](domain::PoolBlock) (bounded allocation that can
//! genuinely run out), and [`Document`](domain::Document) (the
//! zero-custom-logic composite). Trait wiring and error types live in
//! [`buffer_resource`], [`scratch_resource`], [`pool_resource`].
//!
//! ### 3. The Interface ([`handles`])
//! Domain-specific wrappers over the generic `Owned<R>`:
//! [`TextHandle`](handles::TextHandle), [`ScratchHandle`](handles::ScratchHandle),
//! [`BlockHandle`](handles::BlockHandle), sharing defaults through the
//! [`Handle`](handles::Handle) trait.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`Session`](lifecycle::Session) assembles one resource of each kind,
//! survives partial construction failure without leaking, and tears down
//! deterministically. [`setup_tracing`](lifecycle::setup_tracing) wires up
//! the logs.
//!
//! ## 🚀 Quick Start
//!
//! ```
//! use ownership_recipe::domain::BufferSpec;
//! use ownership_recipe::handles::TextHandle;
//!
//! let mut original = TextHandle::create(BufferSpec::new("hello", 64)).unwrap();
//! let copy = original.try_clone().unwrap();
//!
//! original.push_str(", world").unwrap();
//! assert_eq!(original.as_str().unwrap(), "hello, world");
//! assert_eq!(copy.as_str().unwrap(), "hello"); // independent, by construction
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! RUST_LOG=debug cargo test -- --nocapture
//! ```

pub mod buffer_resource;
pub mod domain;
pub mod framework;
pub mod handles;
pub mod lifecycle;
pub mod pool_resource;
pub mod scratch_resource;
