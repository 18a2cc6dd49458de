//! Gunbreaker predicates.
//!
//! One concept per function. Each reads the tick's [`DecisionContext`] only,
//! so the rule tables can compose them freely and tests can probe them one
//! at a time.

use combat_content::gnb::{SPEED_TIERS, actions, buffs, max_cartridges};
use combat_content::{BossPolicy, PartyRequirement};
use combat_core::{GaugeKind, Seconds, SpeedTier};

use crate::context::DecisionContext;

/// An action coming off cooldown within this window already counts as ready.
pub const QUEUE_WINDOW: Seconds = 0.6;

// ============================================================================
// Gauge and tier
// ============================================================================

pub fn ammo(ctx: &DecisionContext) -> u8 {
    ctx.cond().gauge(GaugeKind::Cartridges)
}

/// Position inside the Gnashing Fang / Reign chains, zero when idle.
pub fn gun_step(ctx: &DecisionContext) -> u8 {
    ctx.cond().gauge(GaugeKind::AmmoComboStep)
}

pub fn cartridge_cap(ctx: &DecisionContext) -> u8 {
    max_cartridges(ctx.cond().level())
}

pub fn speed_tier(ctx: &DecisionContext) -> Option<SpeedTier> {
    SPEED_TIERS.bucket(ctx.cond().base_recast())
}

pub fn slow(ctx: &DecisionContext) -> bool {
    speed_tier(ctx) == Some(SpeedTier::Slow)
}

pub fn mid(ctx: &DecisionContext) -> bool {
    speed_tier(ctx) == Some(SpeedTier::Mid)
}

pub fn fast(ctx: &DecisionContext) -> bool {
    speed_tier(ctx) == Some(SpeedTier::Fast)
}

// ============================================================================
// Windows
// ============================================================================

fn no_mercy_cd(ctx: &DecisionContext) -> Seconds {
    ctx.cond().cooldown_remaining(actions::NO_MERCY)
}

/// Between the two-minute bursts (Bloodfest recast 20-90 s out).
pub fn in_odd_window(ctx: &DecisionContext) -> bool {
    let bloodfest = ctx.cond().cooldown_remaining(actions::BLOODFEST);
    bloodfest > 20.0 && bloodfest < 90.0
}

/// No Mercy was pressed within roughly the last twenty seconds.
pub fn has_no_mercy_window(ctx: &DecisionContext) -> bool {
    (39.5..=60.0).contains(&no_mercy_cd(ctx))
}

/// A defensive cooldown went out recently enough that its effect is still
/// settling in.
pub fn mitigation_active(ctx: &DecisionContext) -> bool {
    ctx.cond().any_just_used(&[
        (ctx.hook(actions::HEART_OF_STONE), 4.0),
        (ctx.hook(actions::NEBULA), 5.0),
        (actions::CAMOUFLAGE, 5.0),
        (actions::RAMPART, 5.0),
        (actions::AURORA, 5.0),
        (actions::SUPERBOLIDE, 9.0),
    ])
}

pub fn can_weave(ctx: &DecisionContext) -> bool {
    ctx.cond().can_weave(ctx.weave().min_weave)
}

/// Inside the late half of the weave window.
pub fn can_late_weave(ctx: &DecisionContext) -> bool {
    let weave = ctx.weave();
    ctx.cond()
        .can_delayed_weave(weave.late_weave_start, weave.min_weave)
}

// ============================================================================
// Availability
// ============================================================================

pub fn can_gnashing_fang(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::GNASHING_FANG)
        && cond.cooldown_remaining(actions::GNASHING_FANG) < QUEUE_WINDOW
        && !cond.has_status(buffs::READY_TO_BLAST)
        && gun_step(ctx) == 0
        && ammo(ctx) > 0
}

pub fn can_double_down(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::DOUBLE_DOWN)
        && cond.cooldown_remaining(actions::DOUBLE_DOWN) < QUEUE_WINDOW
        && ammo(ctx) > 0
}

pub fn can_bloodfest(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::BLOODFEST)
        && cond.cooldown_remaining(actions::BLOODFEST) < QUEUE_WINDOW
}

pub fn can_zone(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::DANGER_ZONE)
        && cond.cooldown_remaining(ctx.hook(actions::DANGER_ZONE)) < QUEUE_WINDOW
}

pub fn can_sonic_break(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::SONIC_BREAK) && cond.has_status(buffs::READY_TO_BREAK)
}

pub fn can_bow_shock(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::BOW_SHOCK)
        && cond.cooldown_remaining(actions::BOW_SHOCK) < QUEUE_WINDOW
}

pub fn can_reign(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::REIGN_OF_BEASTS)
        && gun_step(ctx) == 0
        && cond.has_status(buffs::READY_TO_REIGN)
}

/// Gnashing Fang is spent (or not learned yet).
fn fang_spent(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.is_on_cooldown(actions::GNASHING_FANG) || !cond.level_checked(actions::GNASHING_FANG)
}

/// Double Down is spent (or not learned yet).
fn double_down_spent(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.is_on_cooldown(actions::DOUBLE_DOWN) || !cond.level_checked(actions::DOUBLE_DOWN)
}

// ============================================================================
// Single target
// ============================================================================

/// No Mercy placement.
///
/// Slow GCDs weave it normally; fast GCDs late-weave it so the burst window
/// covers one more GCD; mid GCDs late-weave only in even windows.
pub fn should_use_no_mercy(ctx: &DecisionContext, stop_below: f32) -> bool {
    let cond = ctx.cond();
    let ammo = ammo(ctx);
    let odd = in_odd_window(ctx);

    let minimum = no_mercy_cd(ctx) < QUEUE_WINDOW
        && cond.in_combat()
        && cond.has_battle_target()
        && cond.target_hp_percent() > stop_below;
    let three = (odd
        && (ammo >= 2 || (cond.combo_action() == Some(actions::BRUTAL_SHELL) && ammo == 1)))
        || (!odd && ammo != 3);
    let two = if cond.level_at_least(30) {
        ammo > 0
    } else {
        no_mercy_cd(ctx) < QUEUE_WINDOW
    };
    let ready = minimum && if cond.level_at_least(88) { three } else { two };

    ready
        && match speed_tier(ctx) {
            Some(SpeedTier::Fast) => can_late_weave(ctx),
            Some(SpeedTier::Mid) if !odd => can_late_weave(ctx),
            _ => can_weave(ctx),
        }
}

pub fn should_use_bloodfest(ctx: &DecisionContext) -> bool {
    ctx.cond().has_battle_target() && can_weave(ctx) && can_bloodfest(ctx) && ammo(ctx) == 0
}

pub fn should_use_zone(ctx: &DecisionContext) -> bool {
    let nm = no_mercy_cd(ctx);
    can_zone(ctx) && can_weave(ctx) && nm > 17.0 && nm < 57.5
}

pub fn should_use_bow_shock(ctx: &DecisionContext) -> bool {
    let nm = no_mercy_cd(ctx);
    can_bow_shock(ctx) && can_weave(ctx) && (40.0..57.5).contains(&nm)
}

/// Continuation follow-ups.
///
/// Hypervelocity on slow GCDs waits out the No Mercy press unless the GCD is
/// about to roll anyway.
pub fn should_use_continuation(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    if !cond.level_checked(actions::CONTINUATION) {
        return false;
    }
    let weave = can_weave(ctx);

    if cond.has_status(buffs::READY_TO_RIP)
        || cond.has_status(buffs::READY_TO_TEAR)
        || cond.has_status(buffs::READY_TO_GOUGE)
    {
        return weave;
    }

    if !cond.level_checked(actions::HYPERVELOCITY) || !cond.has_status(buffs::READY_TO_BLAST) {
        return false;
    }
    if cond.level_checked(actions::DOUBLE_DOWN) && slow(ctx) {
        (no_mercy_cd(ctx) > 1.5 && weave) || cond.can_delayed_weave(ctx.weave().min_weave, 0.0)
    } else {
        weave
    }
}

pub fn should_use_gnashing_fang(ctx: &DecisionContext) -> bool {
    let nm = no_mercy_cd(ctx);
    can_gnashing_fang(ctx)
        && ((nm > 17.0 && nm < 35.0) || ctx.cond().just_used(actions::NO_MERCY, 6.0))
}

pub fn should_use_double_down(ctx: &DecisionContext) -> bool {
    can_double_down(ctx)
        && has_no_mercy_window(ctx)
        && (ctx.cond().is_on_cooldown(actions::GNASHING_FANG) || ammo(ctx) == 1)
}

pub fn should_use_sonic_break(ctx: &DecisionContext) -> bool {
    can_sonic_break(ctx) && fang_spent(ctx) && double_down_spent(ctx)
}

pub fn should_use_reign(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    can_reign(ctx)
        && cond.is_on_cooldown(actions::GNASHING_FANG)
        && cond.is_on_cooldown(actions::DOUBLE_DOWN)
        && !cond.has_status(buffs::READY_TO_BREAK)
}

pub fn should_use_burst_strike(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    let dd_learned = cond.level_checked(actions::DOUBLE_DOWN);
    cond.level_checked(actions::BURST_STRIKE)
        && ammo(ctx) > 0
        && has_no_mercy_window(ctx)
        && cond.is_on_cooldown(actions::GNASHING_FANG)
        && (cond.is_on_cooldown(actions::DOUBLE_DOWN) || !dd_learned)
        && !cond.has_status(buffs::READY_TO_REIGN)
        && gun_step(ctx) == 0
}

/// Keep hitting something while out of melee range.
pub fn should_use_lightning_shot(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.level_checked(actions::LIGHTNING_SHOT) && !cond.in_melee_range() && cond.has_battle_target()
}

// ============================================================================
// Area
// ============================================================================

/// Area No Mercy: pressed on cooldown while something is worth hitting.
pub fn should_use_no_mercy_aoe(ctx: &DecisionContext, stop_below: f32) -> bool {
    let cond = ctx.cond();
    no_mercy_cd(ctx) < QUEUE_WINDOW
        && cond.in_combat()
        && cond.target_hp_percent() > stop_below
        && (!cond.level_at_least(30) || ammo(ctx) > 0)
        && can_weave(ctx)
}

pub fn should_use_fated_brand(ctx: &DecisionContext) -> bool {
    ctx.cond().has_status(buffs::READY_TO_RAZE) && can_weave(ctx)
}

pub fn should_use_double_down_aoe(ctx: &DecisionContext) -> bool {
    can_double_down(ctx) && (has_no_mercy_window(ctx) || ammo(ctx) == cartridge_cap(ctx))
}

pub fn should_use_sonic_break_aoe(ctx: &DecisionContext) -> bool {
    can_sonic_break(ctx) && double_down_spent(ctx)
}

pub fn should_use_reign_aoe(ctx: &DecisionContext) -> bool {
    can_reign(ctx) && double_down_spent(ctx) && !ctx.cond().has_status(buffs::READY_TO_BREAK)
}

pub fn should_use_fated_circle(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    let ammo = ammo(ctx);
    cond.level_checked(actions::FATED_CIRCLE)
        && ammo > 0
        && gun_step(ctx) == 0
        && ((has_no_mercy_window(ctx) && double_down_spent(ctx)) || ammo == cartridge_cap(ctx))
}

// ============================================================================
// Mitigation
// ============================================================================

pub fn hp_at_most(ctx: &DecisionContext, threshold: f32) -> bool {
    ctx.cond().player_hp_percent() <= threshold
}

/// Neither Heart of Stone nor Heart of Corundum is already up.
pub fn no_heart_buff(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    !cond.has_status(buffs::HEART_OF_CORUNDUM) && !cond.has_status(buffs::HEART_OF_STONE)
}

/// Aurora is not already ticking on whoever it would land on.
pub fn aurora_missing(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    if cond.target_is_friendly() {
        !cond.target_has_status(buffs::AURORA, true)
    } else {
        !cond.has_status(buffs::AURORA)
    }
}

pub fn aurora_charges_spare(ctx: &DecisionContext) -> bool {
    ctx.cond().remaining_charges(actions::AURORA) > ctx.gnb().mit_aurora_charges
}

pub fn can_reprisal(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    cond.has_battle_target() || cond.nearby_enemies() > 0
}

pub fn heart_of_light_party_ok(ctx: &DecisionContext) -> bool {
    ctx.gnb().mit_heart_of_light_party == PartyRequirement::No || ctx.cond().in_party()
}

pub fn can_arms_length(ctx: &DecisionContext) -> bool {
    let cond = ctx.cond();
    let gnb = ctx.gnb();
    cond.nearby_enemies() >= gnb.mit_arms_length_enemies
        && (gnb.mit_arms_length_boss == BossPolicy::AnyTarget || !cond.target_is_boss())
}
