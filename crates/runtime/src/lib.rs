//! Rotation decision runtime.
//!
//! This crate turns one combat snapshot and one user policy into at most one
//! action per tick. Consumers keep an [`Engine`] for the session and call
//! [`Engine::decide`] (or [`Engine::tick`] with a [`GameBinding`]).
//!
//! Modules are organized by responsibility:
//! - [`rotation`] hosts the role tables and the stateless decision walk
//! - [`opener`] plays scripted openers as a single state machine
//! - [`lease`] and [`ipc`] expose capability leases to external processes
//! - [`workers`] keeps the feature status check off the decision path
//! - [`api`] exposes the binding trait and the error type
//! - [`engine`] owns the long-lived state and ties the rest together
pub mod api;
pub mod context;
pub mod engine;
pub mod ipc;
pub mod lease;
pub mod opener;
pub mod rotation;
pub mod workers;

pub use api::{GameBinding, ReplayBinding, Result, RuntimeError, WorkerKind};
pub use context::DecisionContext;
pub use engine::{Engine, EngineBuilder, RuntimeConfig};
pub use ipc::PolicyView;
pub use lease::{
    CancellationReason, LeaseGateway, LeaseId, LeaseInfo, LeaseValidation, LeaseeNotifier,
    SetResult,
};
pub use opener::{OpenerAbort, OpenerOutcome, OpenerOutput, OpenerRun};
pub use rotation::{Decision, DecisionSource, Domain, Mode, Role, RuleCache};
pub use workers::{
    FeatureGate, FeatureStatusWorker, HttpStatusEndpoint, MIN_REFRESH_INTERVAL, StatusEndpoint,
};
