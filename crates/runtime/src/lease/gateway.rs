//! Lease table with serialized mutations.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use combat_content::{ComboType, Preset};
use tracing::{info, warn};

use super::notify::{LeaseeNotifier, NoopNotifier};
use super::types::{
    CancellationReason, Lease, LeaseId, LeaseInfo, LeaseValidation, PresetOverrides, SetResult,
};

#[derive(Debug, Default)]
struct LeaseTable {
    leases: HashMap<LeaseId, Lease>,
    /// Revoked lease ids, kept until the lease would have expired anyway.
    blacklisted: HashMap<LeaseId, Instant>,
    blacklisted_holders: HashSet<String>,
    suspended: bool,
}

impl LeaseTable {
    fn validate(&self, id: LeaseId, now: Instant) -> LeaseValidation {
        if self.suspended {
            return LeaseValidation::FeatureDisabled;
        }
        if self.blacklisted.contains_key(&id) {
            return LeaseValidation::BlacklistedLease;
        }
        match self.leases.get(&id) {
            Some(lease) if !lease.is_expired(now) => LeaseValidation::Ok,
            _ => LeaseValidation::InvalidLease,
        }
    }

    /// Removes expired leases and blacklist entries past their lease's expiry.
    fn drain_expired(&mut self, now: Instant) -> Vec<Cancellation> {
        self.blacklisted.retain(|_, until| now < *until);
        let expired: Vec<LeaseId> = self
            .leases
            .values()
            .filter(|lease| lease.is_expired(now))
            .map(|lease| lease.id)
            .collect();
        expired
            .into_iter()
            .filter_map(|id| self.leases.remove(&id))
            .map(|lease| (lease.id, lease.holder, CancellationReason::Expired))
            .collect()
    }
}

type Cancellation = (LeaseId, String, CancellationReason);

/// Thread-safe lease registry.
///
/// All mutations take one lock, so registration, blacklisting and suspension
/// never interleave. Holders are notified after the lock is dropped.
pub struct LeaseGateway {
    table: Mutex<LeaseTable>,
    ttl: Duration,
    notifier: Arc<dyn LeaseeNotifier>,
}

impl std::fmt::Debug for LeaseGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseGateway")
            .field("ttl", &self.ttl)
            .field("suspended", &self.is_suspended())
            .finish_non_exhaustive()
    }
}

impl LeaseGateway {
    pub fn new(ttl: Duration) -> Self {
        Self::with_notifier(ttl, Arc::new(NoopNotifier))
    }

    pub fn with_notifier(ttl: Duration, notifier: Arc<dyn LeaseeNotifier>) -> Self {
        Self {
            table: Mutex::new(LeaseTable::default()),
            ttl,
            notifier,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LeaseTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, cancellations: Vec<Cancellation>) {
        for (id, holder, reason) in cancellations {
            self.notifier.lease_cancelled(id, &holder, reason);
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_suspended(&self) -> bool {
        self.lock().suspended
    }

    /// Leases held in the table, expired or not, plus revoked ids still remembered.
    pub fn stored(&self) -> usize {
        let table = self.lock();
        table.leases.len() + table.blacklisted.len()
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    pub fn register(&self, holder: &str, reason: &str) -> Result<LeaseId, SetResult> {
        self.register_at(holder, reason, Instant::now())
    }

    /// Issues a lease to `holder`, dropping any leases that expired by `now`.
    ///
    /// Refused with `IpcDisabled` while suspended and `BlacklistedLease` for a
    /// holder the user revoked earlier.
    pub fn register_at(
        &self,
        holder: &str,
        reason: &str,
        now: Instant,
    ) -> Result<LeaseId, SetResult> {
        let mut table = self.lock();
        let expired = table.drain_expired(now);
        let result = self.insert(&mut table, holder, reason, now);
        drop(table);

        self.report_expired(expired);
        result
    }

    fn insert(
        &self,
        table: &mut LeaseTable,
        holder: &str,
        reason: &str,
        now: Instant,
    ) -> Result<LeaseId, SetResult> {
        if table.suspended {
            warn!(target: "ipc", "Lease refused for {}: leasing is suspended", holder);
            return Err(SetResult::IpcDisabled);
        }
        if table.blacklisted_holders.contains(holder) {
            warn!(target: "ipc", "Lease refused for {}: holder is blacklisted", holder);
            return Err(SetResult::BlacklistedLease);
        }

        let id = LeaseId::new();
        table.leases.insert(
            id,
            Lease {
                id,
                holder: holder.to_string(),
                reason: reason.to_string(),
                issued_at: now,
                expires_at: now + self.ttl,
                overrides: PresetOverrides::default(),
            },
        );
        info!(target: "ipc", "Lease {} registered for {} ({})", id, holder, reason);
        Ok(id)
    }

    pub fn validate(&self, id: LeaseId) -> LeaseValidation {
        self.validate_at(id, Instant::now())
    }

    /// Suspension is checked first, then the blacklist, then existence and expiry.
    pub fn validate_at(&self, id: LeaseId, now: Instant) -> LeaseValidation {
        self.lock().validate(id, now)
    }

    /// Ends a lease at its holder's request. Returns `false` if it was not active.
    pub fn release(&self, id: LeaseId) -> bool {
        let removed = self.lock().leases.remove(&id);
        match removed {
            Some(lease) => {
                info!(target: "ipc", "Lease {} released by {}", id, lease.holder);
                self.notify(vec![(id, lease.holder, CancellationReason::LeaseeReleased)]);
                true
            }
            None => false,
        }
    }

    /// Revokes a lease and bars its holder from registering again.
    pub fn blacklist(&self, id: LeaseId) {
        self.blacklist_at(id, Instant::now())
    }

    /// The revoked id is remembered until the lease would have expired; the
    /// holder stays barred for the life of the gateway.
    pub fn blacklist_at(&self, id: LeaseId, now: Instant) {
        let mut table = self.lock();
        let removed = table.leases.remove(&id);
        let until = removed
            .as_ref()
            .map_or(now + self.ttl, |lease| lease.expires_at);
        table.blacklisted.insert(id, until);
        if let Some(lease) = &removed {
            table.blacklisted_holders.insert(lease.holder.clone());
        }
        drop(table);

        warn!(target: "ipc", "Lease {} blacklisted", id);
        if let Some(lease) = removed {
            self.notify(vec![(id, lease.holder, CancellationReason::Blacklisted)]);
        }
    }

    /// Invalidates every lease at once and refuses new ones until [`Self::resume`].
    pub fn suspend_all(&self) {
        let mut table = self.lock();
        table.suspended = true;
        let cancelled: Vec<Cancellation> = table
            .leases
            .drain()
            .map(|(id, lease)| (id, lease.holder, CancellationReason::AllServicesSuspended))
            .collect();
        drop(table);

        warn!(target: "ipc", "Leasing suspended ({} leases cancelled)", cancelled.len());
        self.notify(cancelled);
    }

    /// Accepts registrations again. Leases cancelled by the suspension stay gone.
    pub fn resume(&self) {
        let mut table = self.lock();
        if table.suspended {
            table.suspended = false;
            info!(target: "ipc", "Leasing resumed");
        }
    }

    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Drops expired leases and stale blacklist ids. Returns how many leases
    /// were removed.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let expired = self.lock().drain_expired(now);
        self.report_expired(expired)
    }

    fn report_expired(&self, expired: Vec<Cancellation>) -> usize {
        let count = expired.len();
        if count > 0 {
            info!(target: "ipc", "{} leases expired", count);
        }
        self.notify(expired);
        count
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    pub fn set_preset(&self, id: LeaseId, preset: Preset, enabled: bool) -> SetResult {
        self.set_preset_at(id, preset, enabled, Instant::now())
    }

    pub fn set_preset_at(&self, id: LeaseId, preset: Preset, enabled: bool, now: Instant) -> SetResult {
        self.update(id, now, |overrides| {
            overrides.enabled.insert(preset, enabled);
            SetResult::Okay
        })
    }

    pub fn set_auto_mode(&self, id: LeaseId, preset: Preset, on: bool) -> SetResult {
        self.set_auto_mode_at(id, preset, on, Instant::now())
    }

    /// Auto-mode only exists on combos, not on their options.
    pub fn set_auto_mode_at(&self, id: LeaseId, preset: Preset, on: bool, now: Instant) -> SetResult {
        if preset.info().combo_type == ComboType::Option {
            warn!(target: "ipc", "Auto-mode requested for option {}", preset);
            return SetResult::InvalidValue;
        }
        self.update(id, now, |overrides| {
            overrides.auto_mode.insert(preset, on);
            SetResult::Okay
        })
    }

    fn update(
        &self,
        id: LeaseId,
        now: Instant,
        apply: impl FnOnce(&mut PresetOverrides) -> SetResult,
    ) -> SetResult {
        let mut table = self.lock();
        let validation = table.validate(id, now);
        if !validation.is_ok() {
            let result = SetResult::from(validation);
            warn!(target: "ipc", "Set refused for lease {}: {}", id, result);
            return result;
        }
        match table.leases.get_mut(&id) {
            Some(lease) => apply(&mut lease.overrides),
            None => SetResult::InvalidLease,
        }
    }

    /// Overrides of every live lease, oldest lease first so newer ones win.
    pub fn overrides(&self) -> PresetOverrides {
        self.overrides_at(Instant::now())
    }

    pub fn overrides_at(&self, now: Instant) -> PresetOverrides {
        let table = self.lock();
        let mut merged = PresetOverrides::default();
        if table.suspended {
            return merged;
        }
        let mut live: Vec<&Lease> = table
            .leases
            .values()
            .filter(|lease| !lease.is_expired(now))
            .collect();
        live.sort_by_key(|lease| lease.issued_at);
        for lease in live {
            merged.merge(&lease.overrides);
        }
        merged
    }

    pub fn active_leases(&self) -> Vec<LeaseInfo> {
        self.active_leases_at(Instant::now())
    }

    pub fn active_leases_at(&self, now: Instant) -> Vec<LeaseInfo> {
        let table = self.lock();
        let mut leases: Vec<&Lease> = table
            .leases
            .values()
            .filter(|lease| !lease.is_expired(now))
            .collect();
        leases.sort_by_key(|lease| lease.issued_at);
        leases.into_iter().map(Lease::info).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(60);

    #[test]
    fn registered_lease_validates_until_it_expires() {
        let gateway = LeaseGateway::new(TTL);
        let now = Instant::now();
        let id = gateway.register_at("autoduty", "dungeon run", now).unwrap();

        assert_eq!(gateway.validate_at(id, now), LeaseValidation::Ok);
        assert_eq!(
            gateway.validate_at(id, now + TTL),
            LeaseValidation::InvalidLease
        );
    }

    #[test]
    fn unknown_lease_is_invalid() {
        let gateway = LeaseGateway::new(TTL);
        assert_eq!(gateway.validate(LeaseId::new()), LeaseValidation::InvalidLease);
    }

    #[test]
    fn auto_mode_on_an_option_is_an_invalid_value() {
        let gateway = LeaseGateway::new(TTL);
        let id = gateway.register("questionable", "testing").unwrap();
        assert_eq!(
            gateway.set_auto_mode(id, Preset::GnbStNoMercy, true),
            SetResult::InvalidValue
        );
        assert_eq!(
            gateway.set_auto_mode(id, Preset::GnbStAdvanced, true),
            SetResult::Okay
        );
    }

    #[test]
    fn expired_overrides_stop_applying() {
        let gateway = LeaseGateway::new(TTL);
        let now = Instant::now();
        let id = gateway.register_at("autoduty", "run", now).unwrap();
        assert_eq!(
            gateway.set_preset_at(id, Preset::GnbStSimple, true, now),
            SetResult::Okay
        );

        assert_eq!(
            gateway.overrides_at(now).enabled.get(&Preset::GnbStSimple),
            Some(&true)
        );
        assert!(gateway.overrides_at(now + TTL).is_empty());
        assert_eq!(gateway.purge_expired_at(now + TTL), 1);
    }

    #[test]
    fn registering_sweeps_expired_leases() {
        let gateway = LeaseGateway::new(Duration::from_millis(1));
        let start = Instant::now();
        for i in 0..1000 {
            gateway.register_at(&format!("holder-{i}"), "burst", start).unwrap();
        }
        assert_eq!(gateway.stored(), 1000);

        let later = start + Duration::from_millis(5);
        let fresh = gateway.register_at("fresh", "after expiry", later).unwrap();
        assert_eq!(gateway.stored(), 1);
        assert_eq!(gateway.active_leases_at(later).len(), 1);
        assert_eq!(gateway.validate_at(fresh, later), LeaseValidation::Ok);
    }

    #[test]
    fn revoked_ids_are_forgotten_once_their_lease_would_expire() {
        let gateway = LeaseGateway::new(TTL);
        let now = Instant::now();
        let id = gateway.register_at("rogue", "spam", now).unwrap();
        gateway.blacklist_at(id, now);
        assert_eq!(gateway.stored(), 1);
        assert_eq!(gateway.validate_at(id, now), LeaseValidation::BlacklistedLease);

        assert_eq!(gateway.purge_expired_at(now + TTL), 0);
        assert_eq!(gateway.stored(), 0);
        assert_eq!(gateway.validate_at(id, now + TTL), LeaseValidation::InvalidLease);
        // The holder stays barred.
        assert_eq!(
            gateway.register_at("rogue", "again", now + TTL),
            Err(SetResult::BlacklistedLease)
        );
    }
}
