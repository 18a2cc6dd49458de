//! Gunbreaker rule tables.
//!
//! Each builder returns one domain's entries in rank order. The tables are
//! plain data: tests enumerate them and toggle entries one preset at a time.

pub mod combo;
pub mod conditions;

use combat_content::Preset;
use combat_content::gnb::actions;
use combat_core::ActionId;
use rule_table::builder::{all, when};
use rule_table::{Predicate, RuleEntry};

use self::conditions::*;
use super::{Domain, GnbTable, Mode};
use crate::context::DecisionContext;

/// Domain tables for a mode, in precedence order.
pub fn tables(mode: Mode) -> Vec<GnbTable> {
    match mode {
        Mode::SingleTarget => vec![st_mitigation(), st_off_gcd(), st_ranged(), st_gcd()],
        Mode::MultiTarget => vec![aoe_off_gcd(), aoe_gcd()],
        Mode::Mitigation => vec![mitigation()],
    }
}

/// The action pressed when no table fires.
pub fn base_action(mode: Mode, ctx: &DecisionContext) -> ActionId {
    match mode {
        Mode::SingleTarget => combo::single_target(ctx),
        Mode::MultiTarget => combo::area(ctx),
        // The one-button mitigation sits on Camouflage.
        Mode::Mitigation => actions::CAMOUFLAGE,
    }
}

/// Continues a started Gnashing Fang or Reign of Beasts chain.
///
/// The chain owns the next GCDs once started, so no preset gates it.
fn gun_step_follow_up(ctx: &DecisionContext) -> Option<ActionId> {
    match gun_step(ctx) {
        1 | 2 => Some(actions::GNASHING_FANG),
        3 | 4 => Some(actions::REIGN_OF_BEASTS),
        _ => None,
    }
}

// ============================================================================
// Single target
// ============================================================================

/// In combat, a weave slot open, and nothing else defensive just went out.
fn defensive_slot(ctx: &DecisionContext) -> bool {
    ctx.cond().in_combat() && can_weave(ctx) && !mitigation_active(ctx)
}

/// Each entry has its own option; `GnbStMitigation` switches them all off.
fn st_mitigation() -> GnbTable {
    fn guarded(
        name: &'static str,
        action: ActionId,
        option: Preset,
        check: Box<dyn Predicate<DecisionContext>>,
    ) -> RuleEntry<DecisionContext> {
        RuleEntry::new(name, action).flag(option).when(all(vec![
            when(|ctx: &DecisionContext| ctx.preset_enabled(Preset::GnbStMitigation)),
            when(defensive_slot),
            check,
        ]))
    }

    GnbTable::new(Domain::Mitigation.as_str())
        .rule(guarded(
            "superbolide",
            actions::SUPERBOLIDE,
            Preset::GnbStSuperbolide,
            when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().st_superbolide_hp)),
        ))
        .rule(guarded(
            "corundum",
            actions::HEART_OF_STONE,
            Preset::GnbStCorundum,
            when(all(vec![
                when(no_heart_buff),
                when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().st_corundum_hp)),
            ])),
        ))
        .rule(guarded(
            "nebula",
            actions::NEBULA,
            Preset::GnbStNebula,
            when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().st_nebula_hp)),
        ))
        .rule(guarded(
            "rampart",
            actions::RAMPART,
            Preset::GnbStRampart,
            when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().st_rampart_hp)),
        ))
        .rule(guarded(
            "camouflage",
            actions::CAMOUFLAGE,
            Preset::GnbStCamouflage,
            when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().st_camouflage_hp)),
        ))
}

fn st_off_gcd() -> GnbTable {
    GnbTable::new(Domain::OffGcd.as_str())
        .rule(
            RuleEntry::new("no_mercy", actions::NO_MERCY)
                .flag(Preset::GnbStNoMercy)
                .when(|ctx: &DecisionContext| {
                    should_use_no_mercy(ctx, ctx.gnb().st_no_mercy_stop)
                }),
        )
        .rule(
            RuleEntry::new("bloodfest", actions::BLOODFEST)
                .flag(Preset::GnbStBloodfest)
                .when(should_use_bloodfest),
        )
        .rule(
            RuleEntry::new("zone", actions::DANGER_ZONE)
                .flag(Preset::GnbStZone)
                .when(should_use_zone),
        )
        .rule(
            RuleEntry::new("bow_shock", actions::BOW_SHOCK)
                .flag(Preset::GnbStBowShock)
                .when(should_use_bow_shock),
        )
        .rule(
            RuleEntry::new("continuation", actions::CONTINUATION)
                .flag(Preset::GnbStContinuation)
                .when(should_use_continuation),
        )
}

fn st_ranged() -> GnbTable {
    GnbTable::new(Domain::Ranged.as_str()).rule(
        RuleEntry::new("lightning_shot", actions::LIGHTNING_SHOT)
            .flag(Preset::GnbStLightningShot)
            .when(should_use_lightning_shot),
    )
}

fn st_gcd() -> GnbTable {
    GnbTable::new(Domain::Gcd.as_str())
        .rule(RuleEntry::resolved("gun_step", gun_step_follow_up))
        .rule(
            RuleEntry::new("gnashing_fang", actions::GNASHING_FANG)
                .flag(Preset::GnbStGnashingFang)
                .when(should_use_gnashing_fang),
        )
        .rule(
            RuleEntry::new("double_down", actions::DOUBLE_DOWN)
                .flag(Preset::GnbStDoubleDown)
                .when(should_use_double_down),
        )
        .rule(
            RuleEntry::new("sonic_break", actions::SONIC_BREAK)
                .flag(Preset::GnbStSonicBreak)
                .when(should_use_sonic_break),
        )
        .rule(
            RuleEntry::new("reign", actions::REIGN_OF_BEASTS)
                .flag(Preset::GnbStReign)
                .when(should_use_reign),
        )
        .rule(
            RuleEntry::new("burst_strike", actions::BURST_STRIKE)
                .flag(Preset::GnbStBurstStrike)
                .when(should_use_burst_strike),
        )
}

// ============================================================================
// Area
// ============================================================================

fn aoe_off_gcd() -> GnbTable {
    GnbTable::new(Domain::OffGcd.as_str())
        .rule(
            RuleEntry::new("no_mercy", actions::NO_MERCY)
                .flag(Preset::GnbAoeNoMercy)
                .when(|ctx: &DecisionContext| {
                    should_use_no_mercy_aoe(ctx, ctx.gnb().aoe_no_mercy_stop)
                }),
        )
        .rule(
            RuleEntry::new("bloodfest", actions::BLOODFEST)
                .flag(Preset::GnbAoeBloodfest)
                .when(should_use_bloodfest),
        )
        .rule(
            RuleEntry::new("zone", actions::DANGER_ZONE)
                .flag(Preset::GnbAoeZone)
                .when(should_use_zone),
        )
        .rule(
            RuleEntry::new("bow_shock", actions::BOW_SHOCK)
                .flag(Preset::GnbAoeBowShock)
                .when(should_use_bow_shock),
        )
        .rule(
            RuleEntry::new("fated_brand", actions::CONTINUATION)
                .flag(Preset::GnbAoeContinuation)
                .when(should_use_fated_brand),
        )
}

fn aoe_gcd() -> GnbTable {
    GnbTable::new(Domain::Gcd.as_str())
        .rule(RuleEntry::resolved("gun_step", gun_step_follow_up))
        .rule(
            RuleEntry::new("double_down", actions::DOUBLE_DOWN)
                .flag(Preset::GnbAoeDoubleDown)
                .when(should_use_double_down_aoe),
        )
        .rule(
            RuleEntry::new("sonic_break", actions::SONIC_BREAK)
                .flag(Preset::GnbAoeSonicBreak)
                .when(should_use_sonic_break_aoe),
        )
        .rule(
            RuleEntry::new("reign", actions::REIGN_OF_BEASTS)
                .flag(Preset::GnbAoeReign)
                .when(should_use_reign_aoe),
        )
        .rule(
            RuleEntry::new("fated_circle", actions::FATED_CIRCLE)
                .flag(Preset::GnbAoeFatedCircle)
                .when(should_use_fated_circle),
        )
}

// ============================================================================
// One-button mitigation
// ============================================================================

fn mitigation() -> GnbTable {
    GnbTable::new(Domain::Mitigation.as_str())
        .rule(
            RuleEntry::new("superbolide", actions::SUPERBOLIDE)
                .flag(Preset::GnbMitSuperbolide)
                .when(|ctx: &DecisionContext| {
                    ctx.cond().in_combat() && hp_at_most(ctx, ctx.gnb().mit_superbolide_hp)
                }),
        )
        .rule(
            RuleEntry::new("corundum", actions::HEART_OF_STONE)
                .flag(Preset::GnbMitCorundum)
                .when(all(vec![
                    when(no_heart_buff),
                    when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().mit_corundum_hp)),
                ])),
        )
        .rule(
            RuleEntry::new("aurora", actions::AURORA)
                .flag(Preset::GnbMitAurora)
                .when(all(vec![
                    when(aurora_missing),
                    when(aurora_charges_spare),
                    when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().mit_aurora_hp)),
                ])),
        )
        .rule(RuleEntry::new("camouflage", actions::CAMOUFLAGE).flag(Preset::GnbMitCamouflage))
        .rule(
            RuleEntry::new("reprisal", actions::REPRISAL)
                .flag(Preset::GnbMitReprisal)
                .when(can_reprisal),
        )
        .rule(
            RuleEntry::new("heart_of_light", actions::HEART_OF_LIGHT)
                .flag(Preset::GnbMitHeartOfLight)
                .when(heart_of_light_party_ok),
        )
        .rule(
            RuleEntry::new("rampart", actions::RAMPART)
                .flag(Preset::GnbMitRampart)
                .when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().mit_rampart_hp)),
        )
        .rule(
            RuleEntry::new("arms_length", actions::ARMS_LENGTH)
                .flag(Preset::GnbMitArmsLength)
                .when(can_arms_length),
        )
        .rule(
            RuleEntry::new("nebula", actions::NEBULA)
                .flag(Preset::GnbMitNebula)
                .when(|ctx: &DecisionContext| hp_at_most(ctx, ctx.gnb().mit_nebula_hp)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::cache::RoleTables;
    use crate::rotation::{DecisionSource, Role, evaluate};
    use combat_content::PolicyConfig;
    use combat_core::{CombatSnapshot, EngineConfig, Job, TargetState};

    fn engaged() -> CombatSnapshot {
        CombatSnapshot::new(Job::Gunbreaker, 100)
            .in_combat()
            .with_target(TargetState::hostile(90.0))
            .with_gcd(1.5, 2.5)
    }

    #[test]
    fn every_flag_belongs_to_its_mode() {
        let cases = [
            (Mode::SingleTarget, Preset::GnbStAdvanced),
            (Mode::MultiTarget, Preset::GnbAoeAdvanced),
            (Mode::Mitigation, Preset::GnbMitigation),
        ];
        for (mode, combo) in cases {
            for table in tables(mode) {
                for entry in table.entries() {
                    if let Some(flag) = entry.flag {
                        assert_eq!(flag.root(), combo, "{} in {}", entry.name, table.domain());
                    }
                }
            }
        }
    }

    #[test]
    fn disabling_an_entry_hands_the_slot_to_the_next_rank() {
        let role = Role::new(Job::Gunbreaker, Mode::SingleTarget);
        let tables = RoleTables::build(role);
        let mut policy = PolicyConfig::default().enable_tree(Preset::GnbStAdvanced);

        let ctx = DecisionContext::new(engaged(), policy.clone(), EngineConfig::default());
        let decision = evaluate(&tables, role, &ctx);
        assert_eq!(decision.action, Some(actions::NO_MERCY));
        assert_eq!(
            decision.source,
            DecisionSource::Rule {
                domain: Domain::OffGcd,
                rank: 0,
                rule: "no_mercy",
            }
        );

        policy.enabled.remove(&Preset::GnbStNoMercy);
        let ctx = DecisionContext::new(engaged(), policy, EngineConfig::default());
        let decision = evaluate(&tables, role, &ctx);
        assert_eq!(decision.action, Some(actions::BLOODFEST));
        assert_eq!(
            decision.source,
            DecisionSource::Rule {
                domain: Domain::OffGcd,
                rank: 1,
                rule: "bloodfest",
            }
        );
    }

    #[test]
    fn single_target_mitigation_is_toggled_per_action() {
        let role = Role::new(Job::Gunbreaker, Mode::SingleTarget);
        let tables = RoleTables::build(role);
        let mut policy = PolicyConfig::default().enable_tree(Preset::GnbStAdvanced);
        let decide = |policy: &PolicyConfig| {
            let snapshot = engaged().with_hp(50.0);
            let ctx = DecisionContext::new(snapshot, policy.clone(), EngineConfig::default());
            evaluate(&tables, role, &ctx).source
        };
        let mitigation = |rank, rule| DecisionSource::Rule {
            domain: Domain::Mitigation,
            rank,
            rule,
        };

        assert_eq!(decide(&policy), mitigation(1, "corundum"));

        policy.enabled.remove(&Preset::GnbStCorundum);
        assert_eq!(decide(&policy), mitigation(2, "nebula"));

        policy.enabled.remove(&Preset::GnbStNebula);
        assert_eq!(decide(&policy), mitigation(3, "rampart"));

        // The group switch still turns every entry off.
        policy.enabled.remove(&Preset::GnbStMitigation);
        assert_eq!(
            decide(&policy),
            DecisionSource::Rule {
                domain: Domain::OffGcd,
                rank: 0,
                rule: "no_mercy",
            }
        );
    }

    #[test]
    fn chain_follow_up_ignores_policy() {
        let snapshot = engaged()
            .with_gcd(0.0, 2.5)
            .with_gauge(combat_core::GaugeKind::AmmoComboStep, 1);
        let ctx = DecisionContext::new(snapshot, PolicyConfig::default(), EngineConfig::default());
        assert_eq!(gun_step_follow_up(&ctx), Some(actions::GNASHING_FANG));

        let idle = DecisionContext::new(engaged(), PolicyConfig::default(), EngineConfig::default());
        assert_eq!(gun_step_follow_up(&idle), None);
    }

    #[test]
    fn mitigation_button_falls_back_to_camouflage() {
        let ctx = DecisionContext::new(engaged(), PolicyConfig::default(), EngineConfig::default());
        assert_eq!(base_action(Mode::Mitigation, &ctx), actions::CAMOUFLAGE);
    }
}
