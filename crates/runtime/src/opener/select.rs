//! Opener script selection.

use combat_core::{Conditions, OpenerDefinition, OpenerOptions, SpeedTier, SpeedTierThresholds};

use super::OpenerAbort;

/// Picks the script for the current tier, level and variant.
///
/// Returns the catalog index of the first matching script. A script is only
/// returned when its readiness preconditions hold on this snapshot.
pub fn select(
    catalog: &[OpenerDefinition],
    thresholds: &SpeedTierThresholds,
    cond: &Conditions<'_>,
    options: &OpenerOptions,
) -> Result<usize, OpenerAbort> {
    let tier = speed_tier(thresholds, cond).ok_or(OpenerAbort::NoMatchingDefinition)?;
    let index = catalog
        .iter()
        .position(|def| def.matches(tier, cond.level(), options.variant))
        .ok_or(OpenerAbort::NoMatchingDefinition)?;

    if catalog[index].preconditions_met(cond) {
        Ok(index)
    } else {
        Err(OpenerAbort::PreconditionNotMet)
    }
}

/// The recast tier the client reports right now.
pub fn speed_tier(thresholds: &SpeedTierThresholds, cond: &Conditions<'_>) -> Option<SpeedTier> {
    thresholds.bucket(cond.base_recast())
}

/// First index at or after `from` that is not skipped under `options`.
pub fn next_step(def: &OpenerDefinition, from: usize, options: &OpenerOptions) -> usize {
    (from..def.len())
        .find(|&index| !def.is_skipped(index, options))
        .unwrap_or(def.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_content::gnb::{GNB, SPEED_TIERS, actions, openers};
    use combat_core::{CombatSnapshot, GaugeKind, Job, OpenerVariant, StartChoice};

    fn cond(snapshot: &CombatSnapshot) -> Conditions<'_> {
        Conditions::new(snapshot, &GNB)
    }

    #[test]
    fn fast_recast_picks_the_fast_script_for_the_level_band() {
        let catalog = openers();
        let snapshot = CombatSnapshot::new(Job::Gunbreaker, 100)
            .in_combat()
            .with_base_recast(2.40);

        let index = select(&catalog, &SPEED_TIERS, &cond(&snapshot), &OpenerOptions::default())
            .unwrap();
        let def = &catalog[index];
        assert!(def.tiers.contains(&SpeedTier::Fast));
        assert!(def.band.contains(100));
        assert_eq!(def.variant, OpenerVariant::Normal);
    }

    #[test]
    fn mid_tier_uses_the_fast_scripts() {
        let catalog = openers();
        let snapshot = CombatSnapshot::new(Job::Gunbreaker, 95).with_base_recast(2.46);
        let index = select(&catalog, &SPEED_TIERS, &cond(&snapshot), &OpenerOptions::default())
            .unwrap();
        assert!(catalog[index].tiers.contains(&SpeedTier::Mid));
        assert!(catalog[index].band.contains(95));
    }

    #[test]
    fn missing_readiness_rejects_before_any_step() {
        let catalog = openers();
        let on_cooldown = CombatSnapshot::new(Job::Gunbreaker, 100)
            .with_cooldown(actions::BLOODFEST, 30.0);
        assert_eq!(
            select(&catalog, &SPEED_TIERS, &cond(&on_cooldown), &OpenerOptions::default()),
            Err(OpenerAbort::PreconditionNotMet)
        );

        let loaded = CombatSnapshot::new(Job::Gunbreaker, 100).with_gauge(GaugeKind::Cartridges, 1);
        assert_eq!(
            select(&catalog, &SPEED_TIERS, &cond(&loaded), &OpenerOptions::default()),
            Err(OpenerAbort::PreconditionNotMet)
        );
    }

    #[test]
    fn levels_outside_every_band_have_no_script() {
        let catalog = openers();
        let low = CombatSnapshot::new(Job::Gunbreaker, 80);
        assert_eq!(
            select(&catalog, &SPEED_TIERS, &cond(&low), &OpenerOptions::default()),
            Err(OpenerAbort::NoMatchingDefinition)
        );
    }

    #[test]
    fn melee_start_skips_the_pull() {
        let catalog = openers();
        let melee = OpenerOptions {
            start_choice: StartChoice::Melee,
            ..OpenerOptions::default()
        };
        assert_eq!(next_step(&catalog[0], 0, &OpenerOptions::default()), 0);
        assert_eq!(next_step(&catalog[0], 0, &melee), 1);
        assert_eq!(next_step(&catalog[0], catalog[0].len(), &melee), catalog[0].len());
    }
}
