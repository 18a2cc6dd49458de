//! Gunbreaker opener scripts.
//!
//! Eight scripts: {Lv90, Lv100} x {fast, slow} x {normal, early No Mercy}.
//! Fast scripts also serve the mid tier. Every script starts from full
//! cooldowns and an empty cartridge gauge, and drops its Lightning Shot pull
//! when the user starts in melee.

use combat_core::{
    ActionId, GaugeKind, LevelBand, OpenerDefinition, OpenerVariant, SkipRule, SpeedTier,
    StartChoice,
};

use super::actions::*;
use super::{GNB, max_cartridges};

const FAST: &[SpeedTier] = &[SpeedTier::Fast, SpeedTier::Mid];
const SLOW: &[SpeedTier] = &[SpeedTier::Slow];

const LV90: LevelBand = LevelBand::new(90, 99);
const LV100: LevelBand = LevelBand::new(100, 109);

const READY: &[ActionId] = &[NO_MERCY, GNASHING_FANG, BOW_SHOCK, BLOODFEST, DOUBLE_DOWN];
const EMPTY: &[GaugeKind] = &[GaugeKind::Cartridges];

const MELEE_START: SkipRule = SkipRule {
    steps: &[0],
    when: starts_in_melee,
};

fn starts_in_melee(options: &combat_core::OpenerOptions) -> bool {
    options.start_choice == StartChoice::Melee
}

fn script(
    name: &'static str,
    tiers: &'static [SpeedTier],
    variant: OpenerVariant,
    band: LevelBand,
    steps: &[ActionId],
) -> OpenerDefinition {
    OpenerDefinition::new(name, tiers, variant, band, steps)
        .requiring(READY, EMPTY)
        .skipping(MELEE_START)
        .tracking_gauge(&GNB, GaugeKind::Cartridges, max_cartridges(band.min))
}

/// All Gunbreaker opener scripts.
pub fn openers() -> Vec<OpenerDefinition> {
    use OpenerVariant::{Early, Normal};

    vec![
        script(
            "Lv90 Fast Normal No Mercy",
            FAST,
            Normal,
            LV90,
            &[
                LIGHTNING_SHOT,
                KEEN_EDGE,
                BRUTAL_SHELL,
                SOLID_BARREL,
                NO_MERCY,
                GNASHING_FANG,
                BLOODFEST,
                JUGULAR_RIP,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                BOW_SHOCK,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                BURST_STRIKE,
                HYPERVELOCITY,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        )
        .delay_tolerant(&[4]),
        script(
            "Lv90 Slow Normal No Mercy",
            SLOW,
            Normal,
            LV90,
            &[
                LIGHTNING_SHOT,
                KEEN_EDGE,
                BRUTAL_SHELL,
                NO_MERCY,
                BLOODFEST,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                BURST_STRIKE,
                HYPERVELOCITY,
                SOLID_BARREL,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        ),
        script(
            "Lv90 Fast Early No Mercy",
            FAST,
            Early,
            LV90,
            &[
                LIGHTNING_SHOT,
                BLOODFEST,
                KEEN_EDGE,
                NO_MERCY,
                GNASHING_FANG,
                JUGULAR_RIP,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                BOW_SHOCK,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        )
        .delay_tolerant(&[3]),
        script(
            "Lv90 Slow Early No Mercy",
            SLOW,
            Early,
            LV90,
            &[
                LIGHTNING_SHOT,
                KEEN_EDGE,
                BLOODFEST,
                NO_MERCY,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        ),
        script(
            "Lv100 Fast Normal No Mercy",
            FAST,
            Normal,
            LV100,
            &[
                LIGHTNING_SHOT,
                BLOODFEST,
                KEEN_EDGE,
                BRUTAL_SHELL,
                NO_MERCY,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                REIGN_OF_BEASTS,
                NOBLE_BLOOD,
                LION_HEART,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        )
        .delay_tolerant(&[4]),
        script(
            "Lv100 Slow Normal No Mercy",
            SLOW,
            Normal,
            LV100,
            &[
                LIGHTNING_SHOT,
                BLOODFEST,
                KEEN_EDGE,
                BURST_STRIKE,
                NO_MERCY,
                HYPERVELOCITY,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                REIGN_OF_BEASTS,
                NOBLE_BLOOD,
                LION_HEART,
            ],
        ),
        script(
            "Lv100 Fast Early No Mercy",
            FAST,
            Early,
            LV100,
            &[
                LIGHTNING_SHOT,
                BLOODFEST,
                NO_MERCY,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                REIGN_OF_BEASTS,
                NOBLE_BLOOD,
                LION_HEART,
                BURST_STRIKE,
                HYPERVELOCITY,
            ],
        )
        .delay_tolerant(&[2]),
        script(
            "Lv100 Slow Early No Mercy",
            SLOW,
            Early,
            LV100,
            &[
                LIGHTNING_SHOT,
                BLOODFEST,
                BURST_STRIKE,
                NO_MERCY,
                HYPERVELOCITY,
                GNASHING_FANG,
                JUGULAR_RIP,
                BOW_SHOCK,
                DOUBLE_DOWN,
                BLASTING_ZONE,
                SONIC_BREAK,
                SAVAGE_CLAW,
                ABDOMEN_TEAR,
                WICKED_TALON,
                EYE_GOUGE,
                REIGN_OF_BEASTS,
                NOBLE_BLOOD,
                LION_HEART,
            ],
        ),
    ]
}
