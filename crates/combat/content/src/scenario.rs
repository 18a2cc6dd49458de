//! Recorded tick sequences for offline replay.

use combat_core::CombatSnapshot;

use crate::presets::Preset;

/// A named sequence of snapshots fed to one combo button.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub name: String,
    /// The combo the player is pressing.
    pub combo: Preset,
    pub ticks: Vec<CombatSnapshot>,
}
