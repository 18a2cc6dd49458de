//! Basic combos: the fallback when no rule fires.

use combat_content::OvercapChoice;
use combat_content::gnb::actions;
use combat_core::ActionId;

use super::conditions::{ammo, cartridge_cap};
use crate::context::DecisionContext;

/// Keen Edge -> Brutal Shell -> Solid Barrel.
///
/// With overcap protection on, a full gauge turns the finisher into Burst
/// Strike so the cartridge Solid Barrel would grant is not wasted.
pub fn single_target(ctx: &DecisionContext) -> ActionId {
    let cond = ctx.cond();
    match cond.combo_action() {
        Some(actions::KEEN_EDGE) if cond.level_checked(actions::BRUTAL_SHELL) => {
            actions::BRUTAL_SHELL
        }
        Some(actions::BRUTAL_SHELL) if cond.level_checked(actions::SOLID_BARREL) => {
            if ctx.gnb().st_overcap == OvercapChoice::Spend
                && cond.level_checked(actions::BURST_STRIKE)
                && ammo(ctx) == cartridge_cap(ctx)
            {
                actions::BURST_STRIKE
            } else {
                actions::SOLID_BARREL
            }
        }
        _ => actions::KEEN_EDGE,
    }
}

/// Demon Slice -> Demon Slaughter, unless Slaughter would overcap.
pub fn area(ctx: &DecisionContext) -> ActionId {
    let cond = ctx.cond();
    let finisher = cond.combo_action() == Some(actions::DEMON_SLICE)
        && cond.level_checked(actions::DEMON_SLAUGHTER)
        && (ammo(ctx) != cartridge_cap(ctx) || ctx.gnb().aoe_overcap == OvercapChoice::Ignore);
    if finisher {
        actions::DEMON_SLAUGHTER
    } else {
        actions::DEMON_SLICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_content::PolicyConfig;
    use combat_core::{CombatSnapshot, EngineConfig, GaugeKind, Job};

    fn ctx(snapshot: CombatSnapshot, policy: PolicyConfig) -> DecisionContext {
        DecisionContext::new(snapshot, policy, EngineConfig::default())
    }

    #[test]
    fn single_target_chain_advances() {
        let base = CombatSnapshot::new(Job::Gunbreaker, 100);
        let policy = PolicyConfig::default();

        assert_eq!(single_target(&ctx(base.clone(), policy.clone())), actions::KEEN_EDGE);
        assert_eq!(
            single_target(&ctx(base.clone().with_combo(actions::KEEN_EDGE, 20.0), policy.clone())),
            actions::BRUTAL_SHELL
        );
        assert_eq!(
            single_target(&ctx(base.clone().with_combo(actions::BRUTAL_SHELL, 20.0), policy.clone())),
            actions::SOLID_BARREL
        );
        // An expired combo restarts.
        assert_eq!(
            single_target(&ctx(base.with_combo(actions::BRUTAL_SHELL, 0.0), policy)),
            actions::KEEN_EDGE
        );
    }

    #[test]
    fn full_gauge_finisher_spends_unless_ignored() {
        let full = CombatSnapshot::new(Job::Gunbreaker, 100)
            .with_combo(actions::BRUTAL_SHELL, 20.0)
            .with_gauge(GaugeKind::Cartridges, 3);
        assert_eq!(
            single_target(&ctx(full.clone(), PolicyConfig::default())),
            actions::BURST_STRIKE
        );

        let mut ignore = PolicyConfig::default();
        ignore.gnb.st_overcap = OvercapChoice::Ignore;
        assert_eq!(single_target(&ctx(full, ignore)), actions::SOLID_BARREL);
    }

    #[test]
    fn low_levels_fall_back_to_the_opener_of_the_chain() {
        let snapshot = CombatSnapshot::new(Job::Gunbreaker, 3).with_combo(actions::KEEN_EDGE, 20.0);
        assert_eq!(
            single_target(&ctx(snapshot, PolicyConfig::default())),
            actions::KEEN_EDGE
        );
    }

    #[test]
    fn area_combo_avoids_overcap() {
        let sliced = CombatSnapshot::new(Job::Gunbreaker, 100).with_combo(actions::DEMON_SLICE, 20.0);
        assert_eq!(
            area(&ctx(sliced.clone(), PolicyConfig::default())),
            actions::DEMON_SLAUGHTER
        );

        let full = sliced.with_gauge(GaugeKind::Cartridges, 3);
        assert_eq!(area(&ctx(full.clone(), PolicyConfig::default())), actions::DEMON_SLICE);

        let mut ignore = PolicyConfig::default();
        ignore.gnb.aoe_overcap = OvercapChoice::Ignore;
        assert_eq!(area(&ctx(full, ignore)), actions::DEMON_SLAUGHTER);
    }
}
