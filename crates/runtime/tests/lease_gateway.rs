use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use combat_content::Preset;
use rotation_runtime::{
    CancellationReason, LeaseGateway, LeaseId, LeaseValidation, LeaseeNotifier, SetResult,
};

const TTL: Duration = Duration::from_secs(600);

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(LeaseId, String, CancellationReason)>>,
}

impl Recorder {
    fn take(&self) -> Vec<(LeaseId, String, CancellationReason)> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl LeaseeNotifier for Recorder {
    fn lease_cancelled(&self, lease: LeaseId, holder: &str, reason: CancellationReason) {
        self.seen.lock().unwrap().push((lease, holder.to_string(), reason));
    }
}

fn gateway() -> (LeaseGateway, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let gateway = LeaseGateway::with_notifier(TTL, recorder.clone());
    (gateway, recorder)
}

#[test]
fn release_notifies_and_invalidates() {
    let (gateway, recorder) = gateway();
    let lease = gateway.register("questionable", "auto-duty").unwrap();
    assert_eq!(gateway.validate(lease), LeaseValidation::Ok);

    assert!(gateway.release(lease));
    assert!(!gateway.release(lease));
    assert_eq!(gateway.validate(lease), LeaseValidation::InvalidLease);
    assert_eq!(
        recorder.take(),
        vec![(lease, "questionable".to_string(), CancellationReason::LeaseeReleased)]
    );
}

#[test]
fn blacklisted_holders_stay_out() {
    let (gateway, recorder) = gateway();
    let lease = gateway.register("rogue", "spam").unwrap();
    gateway.blacklist(lease);

    assert_eq!(gateway.validate(lease), LeaseValidation::BlacklistedLease);
    assert_eq!(
        gateway.set_preset(lease, Preset::GnbStSimple, true),
        SetResult::BlacklistedLease
    );
    assert_eq!(gateway.register("rogue", "again"), Err(SetResult::BlacklistedLease));
    assert_eq!(recorder.take().len(), 1);

    // Other holders are unaffected.
    assert!(gateway.register("autoduty", "dungeon").is_ok());
}

#[test]
fn suspension_cancels_everything_until_resumed() {
    let (gateway, recorder) = gateway();
    let first = gateway.register("autoduty", "dungeon").unwrap();
    let second = gateway.register("questionable", "quests").unwrap();
    gateway.set_preset(first, Preset::GnbStSimple, true);

    gateway.suspend_all();
    assert!(gateway.is_suspended());
    assert_eq!(gateway.validate(first), LeaseValidation::FeatureDisabled);
    assert_eq!(
        gateway.set_preset(second, Preset::GnbStSimple, true),
        SetResult::IpcDisabled
    );
    assert_eq!(gateway.register("autoduty", "retry"), Err(SetResult::IpcDisabled));
    assert!(gateway.overrides().is_empty());

    let mut reasons: Vec<_> = recorder.take().into_iter().map(|(_, _, r)| r).collect();
    reasons.dedup();
    assert_eq!(reasons, vec![CancellationReason::AllServicesSuspended]);

    gateway.resume();
    assert!(!gateway.is_suspended());
    assert_eq!(gateway.validate(first), LeaseValidation::InvalidLease);
    let fresh = gateway.register("autoduty", "retry").unwrap();
    assert_eq!(gateway.validate(fresh), LeaseValidation::Ok);
    assert!(gateway.overrides().is_empty());
}

#[test]
fn newer_leases_win_conflicts() {
    let (gateway, _) = gateway();
    let start = Instant::now();
    let older = gateway.register_at("a", "first", start).unwrap();
    let newer = gateway
        .register_at("b", "second", start + Duration::from_secs(1))
        .unwrap();

    let now = start + Duration::from_secs(2);
    assert_eq!(
        gateway.set_preset_at(older, Preset::GnbStAdvanced, true, now),
        SetResult::Okay
    );
    assert_eq!(
        gateway.set_preset_at(newer, Preset::GnbStAdvanced, false, now),
        SetResult::Okay
    );

    let overrides = gateway.overrides_at(now);
    assert_eq!(overrides.enabled.get(&Preset::GnbStAdvanced), Some(&false));

    let leases = gateway.active_leases_at(now);
    assert_eq!(leases.len(), 2);
    assert!(leases.iter().all(|info| info.overrides == 1));
}

#[test]
fn expiry_is_reported_on_purge() {
    let (gateway, recorder) = gateway();
    let start = Instant::now();
    let lease = gateway.register_at("a", "short", start).unwrap();

    let later = start + TTL + Duration::from_secs(1);
    assert_eq!(gateway.validate_at(lease, later), LeaseValidation::InvalidLease);
    assert_eq!(gateway.purge_expired_at(later), 1);
    assert_eq!(
        recorder.take(),
        vec![(lease, "a".to_string(), CancellationReason::Expired)]
    );
}

#[test]
fn registration_sweeps_and_reports_expired_leases() {
    let (gateway, recorder) = gateway();
    let start = Instant::now();
    let stale: Vec<LeaseId> = (0..100)
        .map(|i| gateway.register_at(&format!("plugin-{i}"), "burst", start).unwrap())
        .collect();
    assert_eq!(gateway.stored(), 100);

    let later = start + TTL + Duration::from_secs(1);
    gateway.register_at("fresh", "after expiry", later).unwrap();
    assert_eq!(gateway.stored(), 1);

    let seen = recorder.take();
    assert_eq!(seen.len(), stale.len());
    assert!(seen.iter().all(|(id, _, reason)| {
        stale.contains(id) && *reason == CancellationReason::Expired
    }));
}
