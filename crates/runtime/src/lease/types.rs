//! Lease data and the typed outcomes returned to external callers.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use combat_content::Preset;
use serde::Serialize;
use uuid::Uuid;

/// Capability token handed to one external process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LeaseId(Uuid);

impl LeaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LeaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for LeaseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for LeaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Preset states a lease holder asked for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetOverrides {
    pub enabled: BTreeMap<Preset, bool>,
    pub auto_mode: BTreeMap<Preset, bool>,
}

impl PresetOverrides {
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.auto_mode.is_empty()
    }

    /// Layers `other` on top; its entries win.
    pub fn merge(&mut self, other: &PresetOverrides) {
        self.enabled.extend(other.enabled.iter().map(|(p, v)| (*p, *v)));
        self.auto_mode.extend(other.auto_mode.iter().map(|(p, v)| (*p, *v)));
    }
}

#[derive(Clone, Debug)]
pub struct Lease {
    pub id: LeaseId,
    /// Name of the external process holding the lease.
    pub holder: String,
    pub reason: String,
    pub issued_at: Instant,
    pub expires_at: Instant,
    pub overrides: PresetOverrides,
}

impl Lease {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn info(&self) -> LeaseInfo {
        LeaseInfo {
            id: self.id,
            holder: self.holder.clone(),
            reason: self.reason.clone(),
            overrides: self.overrides.enabled.len() + self.overrides.auto_mode.len(),
        }
    }
}

/// Read-only summary of an active lease.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LeaseInfo {
    pub id: LeaseId,
    pub holder: String,
    pub reason: String,
    /// Number of preset states the lease currently overrides.
    pub overrides: usize,
}

/// Result of checking a lease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum LeaseValidation {
    Ok,
    /// Unknown, released or expired.
    InvalidLease,
    BlacklistedLease,
    /// Leasing is suspended by the feature status check.
    FeatureDisabled,
}

impl LeaseValidation {
    pub fn is_ok(self) -> bool {
        self == LeaseValidation::Ok
    }
}

/// Outcome of a registration or a set request, as reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SetResult {
    Okay,
    IpcDisabled,
    InvalidLease,
    BlacklistedLease,
    InvalidValue,
}

impl From<LeaseValidation> for SetResult {
    fn from(value: LeaseValidation) -> Self {
        match value {
            LeaseValidation::Ok => SetResult::Okay,
            LeaseValidation::InvalidLease => SetResult::InvalidLease,
            LeaseValidation::BlacklistedLease => SetResult::BlacklistedLease,
            LeaseValidation::FeatureDisabled => SetResult::IpcDisabled,
        }
    }
}

impl fmt::Display for SetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetResult::Okay => write!(f, "okay"),
            SetResult::IpcDisabled => write!(f, "ipc disabled"),
            SetResult::InvalidLease => write!(f, "invalid lease"),
            SetResult::BlacklistedLease => write!(f, "blacklisted lease"),
            SetResult::InvalidValue => write!(f, "invalid value"),
        }
    }
}

/// Why a holder lost its lease.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CancellationReason {
    /// The holder released it.
    LeaseeReleased,
    /// The user revoked the holder.
    Blacklisted,
    /// The feature status check disabled leasing.
    AllServicesSuspended,
    Expired,
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancellationReason::LeaseeReleased => write!(f, "released by holder"),
            CancellationReason::Blacklisted => write!(f, "blacklisted"),
            CancellationReason::AllServicesSuspended => write!(f, "all services suspended"),
            CancellationReason::Expired => write!(f, "expired"),
        }
    }
}
