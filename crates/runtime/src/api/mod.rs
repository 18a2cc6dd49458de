//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the rotation, opener and lease layers can stay focused on their own rules.

pub mod binding;
pub mod errors;

pub use binding::{GameBinding, ReplayBinding};
pub use errors::{Result, RuntimeError, WorkerKind};
