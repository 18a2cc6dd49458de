//! Preset queries answered to lease holders.
//!
//! These read a policy that already has lease overrides applied (see
//! [`super::PolicyView`]) and categorize presets by job, target and combo type.

use std::collections::HashMap;

use combat_content::{ComboType, PolicyConfig, Preset, TargetType};
use combat_core::Job;
use tracing::debug;

/// Which of a mode's two combos is meant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComboLevel {
    Simple,
    Advanced,
}

impl ComboLevel {
    fn combo_type(self) -> ComboType {
        match self {
            ComboLevel::Simple => ComboType::Simple,
            ComboLevel::Advanced => ComboType::Advanced,
        }
    }
}

/// Which preset state is asked about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComboState {
    Enabled,
    AutoMode,
}

fn state_on(policy: &PolicyConfig, preset: Preset, state: ComboState) -> bool {
    match state {
        ComboState::Enabled => policy.is_enabled(preset),
        ComboState::AutoMode => policy.is_auto_mode(preset),
    }
}

/// Which combo of `job` for `target` has `state` on, Simple first.
///
/// Pass the level returned by a previous call as `previous` to check the same
/// combo for a second state (enabled, then auto-mode). Returns `None` when
/// the job has no combo for `target` or none has the state on.
pub fn current_job_mode_enabled(
    policy: &PolicyConfig,
    job: Job,
    target: TargetType,
    state: ComboState,
    previous: Option<ComboLevel>,
) -> Option<ComboLevel> {
    let simple = Preset::combo(job, target, ComboType::Simple);
    let advanced = Preset::combo(job, target, ComboType::Advanced)?;

    let simple_on = simple.is_some_and(|p| state_on(policy, p, state));
    let advanced_on = state_on(policy, advanced, state);

    match previous {
        Some(ComboLevel::Simple) if simple_on => Some(ComboLevel::Simple),
        Some(_) => advanced_on.then_some(ComboLevel::Advanced),
        None if simple_on => Some(ComboLevel::Simple),
        None => advanced_on.then_some(ComboLevel::Advanced),
    }
}

/// The Advanced combo for a Simple one and vice versa.
///
/// Only single-target and multi-target main combos have an opposite.
pub fn opposite_mode(preset: Preset) -> Option<Preset> {
    let info = preset.info();
    let flipped = match info.combo_type {
        ComboType::Simple => ComboType::Advanced,
        ComboType::Advanced => ComboType::Simple,
        _ => return None,
    };
    match info.target_type {
        TargetType::SingleTarget | TargetType::MultiTarget => {
            Preset::combo(info.job, info.target_type, flipped)
        }
        _ => None,
    }
}

/// Both main modes of `job` are on (and its heal modes, if it has any).
pub fn is_current_job_configured_on(policy: &PolicyConfig, job: Job) -> bool {
    job_targets(job)
        .all(|target| mode_on(policy, job, target, ComboState::Enabled, None).is_some())
}

/// Every mode of `job` is on and allowed to run in auto-rotation.
///
/// The auto-mode check targets the same combo that was found enabled.
pub fn is_current_job_auto_mode_on(policy: &PolicyConfig, job: Job) -> bool {
    job_targets(job).all(|target| {
        mode_on(policy, job, target, ComboState::Enabled, None)
            .and_then(|level| mode_on(policy, job, target, ComboState::AutoMode, Some(level)))
            .is_some()
    })
}

/// Dispatches main modes through [`current_job_mode_enabled`] and heal modes
/// (a single `Other` combo) directly.
fn mode_on(
    policy: &PolicyConfig,
    job: Job,
    target: TargetType,
    state: ComboState,
    previous: Option<ComboLevel>,
) -> Option<ComboLevel> {
    match target {
        TargetType::SingleTarget | TargetType::MultiTarget => {
            current_job_mode_enabled(policy, job, target, state, previous)
        }
        _ => Preset::combo(job, target, ComboType::Other)
            .filter(|p| state_on(policy, *p, state))
            .map(|_| ComboLevel::Advanced),
    }
}

/// Target types `job` has a main combo for.
fn job_targets(job: Job) -> impl Iterator<Item = TargetType> {
    [
        TargetType::SingleTarget,
        TargetType::MultiTarget,
        TargetType::HealSingleTarget,
        TargetType::HealMultiTarget,
    ]
    .into_iter()
    .filter(move |&target| {
        let combo_type = match target {
            TargetType::SingleTarget | TargetType::MultiTarget => ComboType::Advanced,
            _ => ComboType::Other,
        };
        Preset::combo(job, target, combo_type).is_some()
    })
}

/// Cached lists of the presets that make a job auto-rotation ready.
///
/// Per mode: the Simple combo if the job has one, otherwise the Advanced
/// combo (plus its options when asked). Heal combos are always listed.
#[derive(Debug, Default)]
pub struct AutoRotationPresets {
    cache: HashMap<(Job, bool), Vec<Preset>>,
}

impl AutoRotationPresets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, job: Job, include_options: bool) -> &[Preset] {
        self.cache
            .entry((job, include_options))
            .or_insert_with(|| {
                debug!("Collecting auto-rotation presets for {}", job);
                auto_rotation_ready_presets(job, include_options)
            })
    }

    /// Drops cached lists, for one job or all.
    pub fn invalidate(&mut self, job: Option<Job>) {
        match job {
            Some(job) => self.cache.retain(|(cached, _), _| *cached != job),
            None => self.cache.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Uncached form of [`AutoRotationPresets::get`].
pub fn auto_rotation_ready_presets(job: Job, include_options: bool) -> Vec<Preset> {
    let mut presets = Vec::new();
    for target in [TargetType::SingleTarget, TargetType::MultiTarget] {
        if let Some(simple) = Preset::combo(job, target, ComboLevel::Simple.combo_type()) {
            presets.push(simple);
        } else if let Some(advanced) = Preset::combo(job, target, ComboLevel::Advanced.combo_type()) {
            presets.push(advanced);
            if include_options {
                presets.extend(advanced.options());
            }
        }
    }
    for target in [TargetType::HealSingleTarget, TargetType::HealMultiTarget] {
        if let Some(heal) = Preset::combo(job, target, ComboType::Other) {
            presets.push(heal);
            if include_options {
                presets.extend(heal.options());
            }
        }
    }
    presets
}

#[cfg(test)]
mod tests {
    use super::*;

    const GNB: Job = Job::Gunbreaker;

    #[test]
    fn simple_is_reported_before_advanced() {
        let both = PolicyConfig::default().enable([Preset::GnbStSimple, Preset::GnbStAdvanced]);
        assert_eq!(
            current_job_mode_enabled(&both, GNB, TargetType::SingleTarget, ComboState::Enabled, None),
            Some(ComboLevel::Simple)
        );

        let advanced = PolicyConfig::default().enable([Preset::GnbStAdvanced]);
        assert_eq!(
            current_job_mode_enabled(&advanced, GNB, TargetType::SingleTarget, ComboState::Enabled, None),
            Some(ComboLevel::Advanced)
        );
        assert_eq!(
            current_job_mode_enabled(
                &PolicyConfig::default(),
                GNB,
                TargetType::SingleTarget,
                ComboState::Enabled,
                None
            ),
            None
        );
    }

    #[test]
    fn previous_level_pins_the_auto_mode_check() {
        let mut policy = PolicyConfig::default().enable([Preset::GnbStSimple]);
        policy.auto_mode.insert(Preset::GnbStAdvanced);

        // Simple is enabled but only Advanced is in auto-mode.
        assert_eq!(
            current_job_mode_enabled(
                &policy,
                GNB,
                TargetType::SingleTarget,
                ComboState::AutoMode,
                Some(ComboLevel::Simple)
            ),
            Some(ComboLevel::Advanced)
        );
        policy.auto_mode.clear();
        assert_eq!(
            current_job_mode_enabled(
                &policy,
                GNB,
                TargetType::SingleTarget,
                ComboState::AutoMode,
                Some(ComboLevel::Simple)
            ),
            None
        );
    }

    #[test]
    fn opposite_mode_flips_main_combos_only() {
        assert_eq!(opposite_mode(Preset::GnbStSimple), Some(Preset::GnbStAdvanced));
        assert_eq!(opposite_mode(Preset::GnbAoeAdvanced), Some(Preset::GnbAoeSimple));
        assert_eq!(opposite_mode(Preset::GnbStNoMercy), None);
        assert_eq!(opposite_mode(Preset::GnbMitigation), None);
    }

    #[test]
    fn job_configured_and_auto_mode() {
        let mut policy = PolicyConfig::default().enable([Preset::GnbStSimple, Preset::GnbAoeAdvanced]);
        assert!(is_current_job_configured_on(&policy, GNB));
        assert!(!is_current_job_auto_mode_on(&policy, GNB));

        policy.auto_mode.extend([Preset::GnbStSimple, Preset::GnbAoeAdvanced]);
        assert!(is_current_job_auto_mode_on(&policy, GNB));

        policy.enabled.remove(&Preset::GnbAoeAdvanced);
        assert!(!is_current_job_configured_on(&policy, GNB));
    }

    #[test]
    fn auto_rotation_presets_prefer_simple_and_are_cached() {
        let mut cache = AutoRotationPresets::new();
        assert_eq!(
            cache.get(GNB, true),
            &[Preset::GnbStSimple, Preset::GnbAoeSimple]
        );
        cache.get(GNB, false);
        assert_eq!(cache.len(), 2);

        cache.invalidate(Some(GNB));
        assert!(cache.is_empty());
    }
}
