//! Tombola: a riggable prize-wheel engine with ticketed entries and
//! deterministic spins.
//!
//! This is the public crate. Downstream users depend on **tombola** only.
//!
//! It re-exports the engine from `tombola-core` and adds:
//!   - [`Session`]  (one wheel, rig directives, persistence, and rng in
//!     a single handle)
//!   - [`Error`]    (the flattened session-boundary error)
//!
//! Callers that want to wire stores and rngs themselves can reach the
//! engine directly through the `core` re-export.

pub use tombola_core as core;

pub mod error;
pub mod session;

pub use error::{Error, ErrorClass, ErrorOrigin};
pub use session::Session;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Prelude
//

pub mod prelude {
    pub use crate::{Error, Session};
    pub use tombola_core::prelude::*;
}
