//! Action replacement ("hooks").
//!
//! The client replaces some buttons in place: by level (Danger Zone becomes
//! Blasting Zone) or by state (Gnashing Fang becomes Savage Claw mid-chain).
//! Rules name the base action and resolve the live one through
//! [`live_action`], so cooldown and readiness checks read the right id.

use combat_core::{ActionId, Conditions, GaugeKind};

use super::{actions, buffs};

/// Returns the action the client would actually execute for `action`.
pub fn live_action(action: ActionId, cond: &Conditions<'_>) -> ActionId {
    let step = cond.gauge(GaugeKind::AmmoComboStep);
    match action {
        actions::DANGER_ZONE if cond.level_at_least(80) => actions::BLASTING_ZONE,
        actions::HEART_OF_STONE if cond.level_at_least(82) => actions::HEART_OF_CORUNDUM,
        actions::NEBULA if cond.level_at_least(92) => actions::GREAT_NEBULA,
        actions::GNASHING_FANG => match step {
            1 => actions::SAVAGE_CLAW,
            2 => actions::WICKED_TALON,
            _ => actions::GNASHING_FANG,
        },
        actions::REIGN_OF_BEASTS => match step {
            3 => actions::NOBLE_BLOOD,
            4 => actions::LION_HEART,
            _ => actions::REIGN_OF_BEASTS,
        },
        actions::CONTINUATION => continuation(cond),
        other => other,
    }
}

fn continuation(cond: &Conditions<'_>) -> ActionId {
    const FOLLOW_UPS: [(combat_core::StatusId, ActionId); 5] = [
        (buffs::READY_TO_RIP, actions::JUGULAR_RIP),
        (buffs::READY_TO_TEAR, actions::ABDOMEN_TEAR),
        (buffs::READY_TO_GOUGE, actions::EYE_GOUGE),
        (buffs::READY_TO_BLAST, actions::HYPERVELOCITY),
        (buffs::READY_TO_RAZE, actions::FATED_BRAND),
    ];

    FOLLOW_UPS
        .iter()
        .find(|(status, _)| cond.has_status(*status))
        .map_or(actions::CONTINUATION, |&(_, follow_up)| follow_up)
}
