//! Cross-process lease gateway.
//!
//! External processes register for a lease, then use it to override preset
//! states. Every request is validated first and answered with a typed
//! outcome. The feature status worker can suspend all leasing at once.

mod gateway;
mod notify;
mod types;

pub use gateway::LeaseGateway;
pub use notify::{LeaseeNotifier, NoopNotifier};
pub use types::{
    CancellationReason, Lease, LeaseId, LeaseInfo, LeaseValidation, PresetOverrides, SetResult,
};
