//! Surface exposed to external processes.
//!
//! Requests arrive with a lease, are validated by the [`LeaseGateway`], and
//! land as preset overrides that [`PolicyView`] lays over the user's policy.

pub mod overrides;
pub mod presets;

use combat_content::ComboType;
use combat_core::Job;
use tracing::info;

pub use overrides::PolicyView;
pub use presets::{
    AutoRotationPresets, ComboLevel, ComboState, auto_rotation_ready_presets,
    current_job_mode_enabled, is_current_job_auto_mode_on, is_current_job_configured_on,
    opposite_mode,
};

use crate::lease::{LeaseGateway, LeaseId, SetResult};

/// Enables, under `lease`, every preset `job` needs for auto-rotation and
/// turns auto-mode on for the combos among them.
///
/// Stops at the first refusal and returns it.
pub fn set_job_auto_rotation_ready(
    gateway: &LeaseGateway,
    cache: &mut AutoRotationPresets,
    lease: LeaseId,
    job: Job,
) -> SetResult {
    let presets = cache.get(job, true).to_vec();
    for preset in &presets {
        let result = gateway.set_preset(lease, *preset, true);
        if result != SetResult::Okay {
            return result;
        }
    }
    for preset in presets
        .iter()
        .filter(|p| p.info().combo_type != ComboType::Option)
    {
        let result = gateway.set_auto_mode(lease, *preset, true);
        if result != SetResult::Okay {
            return result;
        }
    }
    info!(target: "ipc", "Lease {} set {} auto-rotation ready", lease, job);
    SetResult::Okay
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_content::{PolicyConfig, Preset};
    use std::time::Duration;

    #[test]
    fn auto_rotation_ready_overrides_make_the_job_ready() {
        let gateway = LeaseGateway::new(Duration::from_secs(60));
        let mut cache = AutoRotationPresets::new();
        let lease = gateway.register("autoduty", "dungeon").unwrap();

        assert_eq!(
            set_job_auto_rotation_ready(&gateway, &mut cache, lease, Job::Gunbreaker),
            SetResult::Okay
        );

        let base = PolicyConfig::default();
        let overrides = gateway.overrides();
        let policy = PolicyView::new(&base, &overrides).effective();
        assert!(policy.is_enabled(Preset::GnbStSimple));
        assert!(is_current_job_auto_mode_on(&policy, Job::Gunbreaker));
    }

    #[test]
    fn refusals_pass_through() {
        let gateway = LeaseGateway::new(Duration::from_secs(60));
        let mut cache = AutoRotationPresets::new();
        let lease = gateway.register("autoduty", "dungeon").unwrap();
        gateway.suspend_all();

        assert_eq!(
            set_job_auto_rotation_ready(&gateway, &mut cache, lease, Job::Gunbreaker),
            SetResult::IpcDisabled
        );
    }
}
