//! User policy: enabled presets and per-job thresholds.
//!
//! The policy is immutable during a tick. The configuration layer may replace
//! it between ticks; lease holders overlay their own preset states on top of
//! it at read time without touching it.

use std::collections::BTreeSet;

use combat_core::OpenerOptions;

use crate::presets::Preset;

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicyConfig {
    /// Presets the user turned on.
    pub enabled: BTreeSet<Preset>,
    /// Presets the user allows auto-rotation to drive.
    pub auto_mode: BTreeSet<Preset>,
    pub gnb: GnbPolicy,
}

impl PolicyConfig {
    pub fn is_enabled(&self, preset: Preset) -> bool {
        self.enabled.contains(&preset)
    }

    pub fn is_auto_mode(&self, preset: Preset) -> bool {
        self.auto_mode.contains(&preset)
    }

    /// Enables presets (and keeps the policy builder-style).
    pub fn enable(mut self, presets: impl IntoIterator<Item = Preset>) -> Self {
        self.enabled.extend(presets);
        self
    }

    /// Enables a combo together with every option under it.
    pub fn enable_tree(self, combo: Preset) -> Self {
        self.enable(std::iter::once(combo).chain(combo.options()))
    }
}

/// What the basic combo does when the cartridge gauge is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OvercapChoice {
    /// Spend a cartridge instead of overcapping.
    #[default]
    Spend,
    /// Keep the combo as is and let the cartridge go to waste.
    Ignore,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PartyRequirement {
    No,
    #[default]
    Yes,
}

/// Which targets Arm's Length may be used against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BossPolicy {
    AnyTarget,
    /// Bosses ignore knockback; never waste the cooldown on them.
    #[default]
    SkipBosses,
}

/// Gunbreaker thresholds. Health values are percentages (0-100).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GnbPolicy {
    /// Stop using No Mercy below this target health.
    pub st_no_mercy_stop: f32,
    pub aoe_no_mercy_stop: f32,
    pub st_overcap: OvercapChoice,
    pub aoe_overcap: OvercapChoice,
    pub opener: OpenerOptions,

    // ===== single-target mitigation =====
    pub st_superbolide_hp: f32,
    pub st_corundum_hp: f32,
    pub st_rampart_hp: f32,
    pub st_camouflage_hp: f32,
    pub st_nebula_hp: f32,

    // ===== one-button mitigation =====
    pub mit_superbolide_hp: f32,
    pub mit_corundum_hp: f32,
    pub mit_aurora_hp: f32,
    /// Charges Aurora keeps in reserve.
    pub mit_aurora_charges: u8,
    pub mit_heart_of_light_party: PartyRequirement,
    pub mit_rampart_hp: f32,
    pub mit_arms_length_enemies: u8,
    pub mit_arms_length_boss: BossPolicy,
    pub mit_nebula_hp: f32,
}

impl Default for GnbPolicy {
    fn default() -> Self {
        Self {
            st_no_mercy_stop: 5.0,
            aoe_no_mercy_stop: 10.0,
            st_overcap: OvercapChoice::Spend,
            aoe_overcap: OvercapChoice::Spend,
            opener: OpenerOptions::default(),

            st_superbolide_hp: 15.0,
            st_corundum_hp: 85.0,
            st_rampart_hp: 70.0,
            st_camouflage_hp: 75.0,
            st_nebula_hp: 60.0,

            mit_superbolide_hp: 10.0,
            mit_corundum_hp: 90.0,
            mit_aurora_hp: 99.0,
            mit_aurora_charges: 0,
            mit_heart_of_light_party: PartyRequirement::Yes,
            mit_rampart_hp: 100.0,
            mit_arms_length_enemies: 3,
            mit_arms_length_boss: BossPolicy::SkipBosses,
            mit_nebula_hp: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_tree_turns_on_every_option() {
        let policy = PolicyConfig::default().enable_tree(Preset::GnbMitigation);

        assert!(policy.is_enabled(Preset::GnbMitigation));
        assert!(policy.is_enabled(Preset::GnbMitNebula));
        assert!(!policy.is_enabled(Preset::GnbStAdvanced));
        assert!(!policy.is_auto_mode(Preset::GnbMitigation));
    }
}
