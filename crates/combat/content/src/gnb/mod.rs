//! Gunbreaker content: identifiers, ability/status tables, upgrade hooks and
//! opener scripts.

pub mod hooks;
pub mod openers;
pub mod tables;

use combat_core::{
    AbilityDescriptor, AbilityOracle, ActionId, Level, SpeedTierThresholds, StatusEffectDescriptor,
    StatusId,
};

pub use hooks::live_action;
pub use openers::openers;

/// Game action ids.
pub mod actions {
    use combat_core::ActionId;

    // ===== offensive =====
    pub const KEEN_EDGE: ActionId = ActionId(16137);
    pub const NO_MERCY: ActionId = ActionId(16138);
    pub const BRUTAL_SHELL: ActionId = ActionId(16139);
    pub const DEMON_SLICE: ActionId = ActionId(16141);
    pub const LIGHTNING_SHOT: ActionId = ActionId(16143);
    pub const DANGER_ZONE: ActionId = ActionId(16144);
    pub const SOLID_BARREL: ActionId = ActionId(16145);
    pub const GNASHING_FANG: ActionId = ActionId(16146);
    pub const SAVAGE_CLAW: ActionId = ActionId(16147);
    pub const DEMON_SLAUGHTER: ActionId = ActionId(16149);
    pub const WICKED_TALON: ActionId = ActionId(16150);
    pub const SONIC_BREAK: ActionId = ActionId(16153);
    pub const CONTINUATION: ActionId = ActionId(16155);
    pub const JUGULAR_RIP: ActionId = ActionId(16156);
    pub const ABDOMEN_TEAR: ActionId = ActionId(16157);
    pub const EYE_GOUGE: ActionId = ActionId(16158);
    pub const BOW_SHOCK: ActionId = ActionId(16159);
    pub const BURST_STRIKE: ActionId = ActionId(16162);
    pub const FATED_CIRCLE: ActionId = ActionId(16163);
    pub const BLOODFEST: ActionId = ActionId(16164);
    pub const BLASTING_ZONE: ActionId = ActionId(16165);
    pub const HYPERVELOCITY: ActionId = ActionId(25759);
    pub const DOUBLE_DOWN: ActionId = ActionId(25760);
    pub const FATED_BRAND: ActionId = ActionId(36936);
    pub const REIGN_OF_BEASTS: ActionId = ActionId(36937);
    pub const NOBLE_BLOOD: ActionId = ActionId(36938);
    pub const LION_HEART: ActionId = ActionId(36939);

    // ===== defensive =====
    pub const CAMOUFLAGE: ActionId = ActionId(16140);
    pub const ROYAL_GUARD: ActionId = ActionId(16142);
    pub const NEBULA: ActionId = ActionId(16148);
    pub const AURORA: ActionId = ActionId(16151);
    pub const SUPERBOLIDE: ActionId = ActionId(16152);
    pub const HEART_OF_LIGHT: ActionId = ActionId(16160);
    pub const HEART_OF_STONE: ActionId = ActionId(16161);
    pub const HEART_OF_CORUNDUM: ActionId = ActionId(25758);
    pub const TRAJECTORY: ActionId = ActionId(36934);
    pub const GREAT_NEBULA: ActionId = ActionId(36935);

    // ===== tank role =====
    pub const RAMPART: ActionId = ActionId(7531);
    pub const REPRISAL: ActionId = ActionId(7535);
    pub const ARMS_LENGTH: ActionId = ActionId(7548);
}

/// Statuses the Gunbreaker applies to itself.
pub mod buffs {
    use combat_core::StatusId;

    pub const NO_MERCY: StatusId = StatusId(1831);
    pub const CAMOUFLAGE: StatusId = StatusId(1832);
    pub const NEBULA: StatusId = StatusId(1834);
    pub const AURORA: StatusId = StatusId(1835);
    pub const SUPERBOLIDE: StatusId = StatusId(1836);
    pub const HEART_OF_LIGHT: StatusId = StatusId(1839);
    pub const HEART_OF_STONE: StatusId = StatusId(1840);
    pub const READY_TO_RIP: StatusId = StatusId(1842);
    pub const READY_TO_TEAR: StatusId = StatusId(1843);
    pub const READY_TO_GOUGE: StatusId = StatusId(1844);
    pub const HEART_OF_CORUNDUM: StatusId = StatusId(2683);
    pub const READY_TO_BLAST: StatusId = StatusId(2686);
    pub const GREAT_NEBULA: StatusId = StatusId(3838);
    pub const READY_TO_RAZE: StatusId = StatusId(3839);
    pub const READY_TO_REIGN: StatusId = StatusId(3840);
    pub const READY_TO_BREAK: StatusId = StatusId(3886);
    pub const RAMPART: StatusId = StatusId(1191);
    pub const ARMS_LENGTH: StatusId = StatusId(1209);
}

/// Statuses the Gunbreaker applies to its target.
pub mod debuffs {
    use combat_core::StatusId;

    pub const SONIC_BREAK: StatusId = StatusId(1837);
    pub const BOW_SHOCK: StatusId = StatusId(1838);
    pub const REPRISAL: StatusId = StatusId(1193);
}

/// Recast boundaries of the Gunbreaker speed tiers.
pub const SPEED_TIERS: SpeedTierThresholds = SpeedTierThresholds {
    mid_at: 2.45,
    slow_at: 2.48,
};

/// Cartridge capacity at a level (Cartridge Charge at 30, Cartridge Charge II at 88).
pub const fn max_cartridges(level: Level) -> u8 {
    if level >= 88 {
        3
    } else if level >= 30 {
        2
    } else {
        0
    }
}

/// Static Gunbreaker tables behind the [`AbilityOracle`] seam.
#[derive(Clone, Copy, Debug, Default)]
pub struct GnbContent;

impl GnbContent {
    pub fn abilities(&self) -> &'static [AbilityDescriptor] {
        tables::ABILITIES
    }

    pub fn statuses(&self) -> &'static [StatusEffectDescriptor] {
        tables::STATUSES
    }
}

impl AbilityOracle for GnbContent {
    fn ability(&self, id: ActionId) -> Option<&AbilityDescriptor> {
        tables::ABILITIES.iter().find(|a| a.id == id)
    }

    fn status(&self, id: StatusId) -> Option<&StatusEffectDescriptor> {
        tables::STATUSES.iter().find(|s| s.id == id)
    }
}

/// Shared oracle instance.
pub static GNB: GnbContent = GnbContent;
