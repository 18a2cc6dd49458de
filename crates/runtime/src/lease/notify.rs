use super::types::{CancellationReason, LeaseId};

/// Tells a holder its lease is gone.
///
/// Called after the gateway lock is released, so implementations may call
/// back into the gateway.
pub trait LeaseeNotifier: Send + Sync {
    fn lease_cancelled(&self, lease: LeaseId, holder: &str, reason: CancellationReason);
}

/// Drops every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl LeaseeNotifier for NoopNotifier {
    fn lease_cancelled(&self, _lease: LeaseId, _holder: &str, _reason: CancellationReason) {}
}
