//! Policy preset catalog.
//!
//! A preset is one user-toggleable entry: a whole combo (the button the user
//! presses) or an option inside one. Every preset carries catalog attributes
//! ([`PresetInfo`]) that the preset queries categorize by.

use combat_core::Job;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// How a combo preset is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComboType {
    /// One-button combo with every option forced on.
    Simple,
    /// Combo whose options are toggled individually.
    Advanced,
    /// An option inside a combo.
    Option,
    Other,
}

/// What a combo preset targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    SingleTarget,
    MultiTarget,
    HealSingleTarget,
    HealMultiTarget,
    Other,
}

/// Catalog attributes of one preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresetInfo {
    pub job: Job,
    pub name: &'static str,
    pub combo_type: ComboType,
    pub target_type: TargetType,
    pub parent: Option<Preset>,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Preset {
    // ===== single target =====
    GnbStSimple,
    GnbStAdvanced,
    GnbStOpener,
    GnbStMitigation,
    GnbStSuperbolide,
    GnbStCorundum,
    GnbStNebula,
    GnbStRampart,
    GnbStCamouflage,
    GnbStNoMercy,
    GnbStBloodfest,
    GnbStZone,
    GnbStBowShock,
    GnbStContinuation,
    GnbStLightningShot,
    GnbStGnashingFang,
    GnbStDoubleDown,
    GnbStSonicBreak,
    GnbStReign,
    GnbStBurstStrike,

    // ===== area =====
    GnbAoeSimple,
    GnbAoeAdvanced,
    GnbAoeNoMercy,
    GnbAoeBloodfest,
    GnbAoeZone,
    GnbAoeBowShock,
    GnbAoeContinuation,
    GnbAoeDoubleDown,
    GnbAoeSonicBreak,
    GnbAoeReign,
    GnbAoeFatedCircle,

    // ===== one-button mitigation =====
    GnbMitigation,
    GnbMitSuperbolide,
    GnbMitCorundum,
    GnbMitAurora,
    GnbMitCamouflage,
    GnbMitReprisal,
    GnbMitHeartOfLight,
    GnbMitRampart,
    GnbMitArmsLength,
    GnbMitNebula,
}

impl Preset {
    pub fn info(self) -> PresetInfo {
        use ComboType as C;
        use Preset::*;
        use TargetType as T;

        let (name, combo_type, target_type, parent) = match self {
            GnbStSimple => ("Simple Mode - Single Target", C::Simple, T::SingleTarget, None),
            GnbStAdvanced => ("Advanced Mode - Single Target", C::Advanced, T::SingleTarget, None),
            GnbStOpener => ("Balance Opener", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStMitigation => ("Mitigation Options", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStSuperbolide => ("Superbolide", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStCorundum => ("Heart of Corundum", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStNebula => ("Nebula", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStRampart => ("Rampart", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStCamouflage => ("Camouflage", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStNoMercy => ("No Mercy", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStBloodfest => ("Bloodfest", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStZone => ("Danger/Blasting Zone", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStBowShock => ("Bow Shock", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStContinuation => ("Continuation", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStLightningShot => ("Lightning Shot Uptime", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStGnashingFang => ("Gnashing Fang", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStDoubleDown => ("Double Down", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStSonicBreak => ("Sonic Break", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStReign => ("Reign of Beasts", C::Option, T::Other, Some(GnbStAdvanced)),
            GnbStBurstStrike => ("Burst Strike", C::Option, T::Other, Some(GnbStAdvanced)),

            GnbAoeSimple => ("Simple Mode - AoE", C::Simple, T::MultiTarget, None),
            GnbAoeAdvanced => ("Advanced Mode - AoE", C::Advanced, T::MultiTarget, None),
            GnbAoeNoMercy => ("No Mercy", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeBloodfest => ("Bloodfest", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeZone => ("Danger/Blasting Zone", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeBowShock => ("Bow Shock", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeContinuation => ("Fated Brand", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeDoubleDown => ("Double Down", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeSonicBreak => ("Sonic Break", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeReign => ("Reign of Beasts", C::Option, T::Other, Some(GnbAoeAdvanced)),
            GnbAoeFatedCircle => ("Fated Circle", C::Option, T::Other, Some(GnbAoeAdvanced)),

            GnbMitigation => ("One-Button Mitigation", C::Other, T::Other, None),
            GnbMitSuperbolide => ("Superbolide Emergency", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitCorundum => ("Heart of Corundum", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitAurora => ("Aurora", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitCamouflage => ("Camouflage", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitReprisal => ("Reprisal", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitHeartOfLight => ("Heart of Light", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitRampart => ("Rampart", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitArmsLength => ("Arm's Length", C::Option, T::Other, Some(GnbMitigation)),
            GnbMitNebula => ("Nebula", C::Option, T::Other, Some(GnbMitigation)),
        };

        PresetInfo {
            job: Job::Gunbreaker,
            name,
            combo_type,
            target_type,
            parent,
        }
    }

    pub fn job(self) -> Job {
        self.info().job
    }

    pub fn parent(self) -> Option<Preset> {
        self.info().parent
    }

    /// The options directly under this preset, in catalog order.
    pub fn options(self) -> impl Iterator<Item = Preset> {
        Preset::iter().filter(move |p| p.parent() == Some(self))
    }

    /// The root combo this preset belongs to (itself for a combo).
    pub fn root(self) -> Preset {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Every preset of a job.
    pub fn for_job(job: Job) -> impl Iterator<Item = Preset> {
        Preset::iter().filter(move |p| p.job() == job)
    }

    /// The primary combo of `job` with the given target and combo type.
    pub fn combo(job: Job, target: TargetType, combo_type: ComboType) -> Option<Preset> {
        Preset::for_job(job).find(|p| {
            let info = p.info();
            info.target_type == target && info.combo_type == combo_type
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_option_has_a_combo_parent() {
        for preset in Preset::iter() {
            let info = preset.info();
            if info.combo_type == ComboType::Option {
                let parent = info.parent.expect("option without parent");
                assert_ne!(parent.info().combo_type, ComboType::Option);
            } else {
                assert!(info.parent.is_none(), "{preset} has a parent");
            }
        }
    }

    #[test]
    fn primary_combos_are_found_by_category() {
        let job = Job::Gunbreaker;
        assert_eq!(
            Preset::combo(job, TargetType::SingleTarget, ComboType::Simple),
            Some(Preset::GnbStSimple)
        );
        assert_eq!(
            Preset::combo(job, TargetType::MultiTarget, ComboType::Advanced),
            Some(Preset::GnbAoeAdvanced)
        );
        assert_eq!(
            Preset::combo(job, TargetType::HealSingleTarget, ComboType::Other),
            None
        );
    }

    #[test]
    fn names_round_trip_through_strum() {
        let name: &'static str = Preset::GnbMitAurora.into();
        assert_eq!(name, "GnbMitAurora");
        assert_eq!("GnbMitAurora".parse::<Preset>(), Ok(Preset::GnbMitAurora));
        assert!("GnbUnknown".parse::<Preset>().is_err());
    }

    #[test]
    fn options_and_root_follow_the_tree() {
        assert_eq!(Preset::GnbMitigation.options().count(), 9);
        assert_eq!(Preset::GnbStReign.root(), Preset::GnbStAdvanced);
        assert_eq!(Preset::GnbStAdvanced.root(), Preset::GnbStAdvanced);
    }
}
