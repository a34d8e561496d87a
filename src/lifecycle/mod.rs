//! System assembly: the composed [`Session`] and observability setup.

pub mod session;
pub mod tracing;

pub use session::*;
pub use self::tracing::setup_tracing;
