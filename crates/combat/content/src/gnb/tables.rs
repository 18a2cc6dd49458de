//! Gunbreaker ability and status tables.

use combat_core::{AbilityDescriptor as A, GaugeKind, StatusEffectDescriptor as S, TargetClass};

use super::{actions, buffs, debuffs};

const CARTS: GaugeKind = GaugeKind::Cartridges;

const SELF_OR_PARTY: TargetClass = TargetClass::SELF.union(TargetClass::PARTY);
const ANY_FRIENDLY: TargetClass = TargetClass::SELF
    .union(TargetClass::PARTY)
    .union(TargetClass::ALLIANCE)
    .union(TargetClass::FRIENDLY);

pub static ABILITIES: &[A] = &[
    // ===== single-target combo =====
    A::gcd(actions::KEEN_EDGE, "Keen Edge", 1),
    A::gcd(actions::BRUTAL_SHELL, "Brutal Shell", 4),
    A::gcd(actions::SOLID_BARREL, "Solid Barrel", 26).with_gauge(CARTS, 1),
    A::gcd(actions::LIGHTNING_SHOT, "Lightning Shot", 15).with_range(20),
    // ===== area combo =====
    A::gcd(actions::DEMON_SLICE, "Demon Slice", 10)
        .with_range(0)
        .with_radius(5)
        .with_targets(TargetClass::SELF),
    A::gcd(actions::DEMON_SLAUGHTER, "Demon Slaughter", 40)
        .with_range(0)
        .with_radius(5)
        .with_targets(TargetClass::SELF)
        .with_gauge(CARTS, 1),
    // ===== cartridge spenders =====
    A::gcd(actions::BURST_STRIKE, "Burst Strike", 30).with_gauge(CARTS, -1),
    A::gcd(actions::FATED_CIRCLE, "Fated Circle", 72)
        .with_range(0)
        .with_radius(5)
        .with_targets(TargetClass::SELF)
        .with_gauge(CARTS, -1),
    A::gcd(actions::GNASHING_FANG, "Gnashing Fang", 60)
        .with_recast_on_gcd(30.0)
        .with_gauge(CARTS, -1),
    A::gcd(actions::SAVAGE_CLAW, "Savage Claw", 60),
    A::gcd(actions::WICKED_TALON, "Wicked Talon", 60),
    A::gcd(actions::DOUBLE_DOWN, "Double Down", 90)
        .with_recast_on_gcd(60.0)
        .with_range(0)
        .with_radius(5)
        .with_targets(TargetClass::SELF)
        .with_gauge(CARTS, -1),
    A::gcd(actions::SONIC_BREAK, "Sonic Break", 54),
    A::gcd(actions::REIGN_OF_BEASTS, "Reign of Beasts", 100),
    A::gcd(actions::NOBLE_BLOOD, "Noble Blood", 100),
    A::gcd(actions::LION_HEART, "Lion Heart", 100),
    // ===== off-GCD damage =====
    A::ogcd(actions::NO_MERCY, "No Mercy", 2, 60.0),
    A::ogcd(actions::DANGER_ZONE, "Danger Zone", 18, 30.0)
        .with_range(3)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::BLASTING_ZONE, "Blasting Zone", 80, 30.0)
        .with_range(3)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::BOW_SHOCK, "Bow Shock", 62, 60.0).with_radius(5),
    A::ogcd(actions::BLOODFEST, "Bloodfest", 76, 120.0)
        .with_range(25)
        .with_targets(TargetClass::HOSTILE)
        .with_gauge(CARTS, 3),
    A::ogcd(actions::CONTINUATION, "Continuation", 70, 1.0),
    A::ogcd(actions::JUGULAR_RIP, "Jugular Rip", 70, 1.0)
        .with_range(5)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::ABDOMEN_TEAR, "Abdomen Tear", 70, 1.0)
        .with_range(5)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::EYE_GOUGE, "Eye Gouge", 70, 1.0)
        .with_range(5)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::HYPERVELOCITY, "Hypervelocity", 86, 1.0)
        .with_range(5)
        .with_targets(TargetClass::HOSTILE),
    A::ogcd(actions::FATED_BRAND, "Fated Brand", 96, 1.0)
        .with_range(5)
        .with_radius(5)
        .with_targets(TargetClass::HOSTILE),
    // ===== defensive =====
    A::ogcd(actions::CAMOUFLAGE, "Camouflage", 6, 90.0),
    A::ogcd(actions::ROYAL_GUARD, "Royal Guard", 10, 2.0),
    A::ogcd(actions::NEBULA, "Nebula", 38, 120.0),
    A::ogcd(actions::GREAT_NEBULA, "Great Nebula", 92, 120.0),
    A::ogcd(actions::AURORA, "Aurora", 45, 60.0)
        .with_charges(2)
        .with_range(30)
        .with_targets(ANY_FRIENDLY),
    A::ogcd(actions::SUPERBOLIDE, "Superbolide", 50, 360.0),
    A::ogcd(actions::HEART_OF_LIGHT, "Heart of Light", 64, 90.0).with_radius(30),
    A::ogcd(actions::HEART_OF_STONE, "Heart of Stone", 68, 25.0)
        .with_range(30)
        .with_targets(SELF_OR_PARTY),
    A::ogcd(actions::HEART_OF_CORUNDUM, "Heart of Corundum", 82, 25.0)
        .with_range(30)
        .with_targets(SELF_OR_PARTY),
    A::ogcd(actions::TRAJECTORY, "Trajectory", 56, 30.0)
        .with_charges(2)
        .with_range(20)
        .with_targets(TargetClass::HOSTILE),
    // ===== tank role =====
    A::ogcd(actions::RAMPART, "Rampart", 8, 90.0),
    A::ogcd(actions::REPRISAL, "Reprisal", 22, 60.0).with_radius(5),
    A::ogcd(actions::ARMS_LENGTH, "Arm's Length", 32, 120.0),
];

pub static STATUSES: &[S] = &[
    S::buff(buffs::NO_MERCY, "No Mercy"),
    S::buff(buffs::CAMOUFLAGE, "Camouflage"),
    S::buff(buffs::NEBULA, "Nebula"),
    S::buff(buffs::GREAT_NEBULA, "Great Nebula"),
    S::buff(buffs::AURORA, "Aurora"),
    S::buff(buffs::SUPERBOLIDE, "Superbolide"),
    S::buff(buffs::HEART_OF_LIGHT, "Heart of Light"),
    S::buff(buffs::HEART_OF_STONE, "Heart of Stone"),
    S::buff(buffs::HEART_OF_CORUNDUM, "Heart of Corundum"),
    S::buff(buffs::READY_TO_RIP, "Ready to Rip"),
    S::buff(buffs::READY_TO_TEAR, "Ready to Tear"),
    S::buff(buffs::READY_TO_GOUGE, "Ready to Gouge"),
    S::buff(buffs::READY_TO_BLAST, "Ready to Blast"),
    S::buff(buffs::READY_TO_RAZE, "Ready to Raze"),
    S::buff(buffs::READY_TO_REIGN, "Ready to Reign"),
    S::buff(buffs::READY_TO_BREAK, "Ready to Break"),
    S::buff(buffs::RAMPART, "Rampart"),
    S::buff(buffs::ARMS_LENGTH, "Arm's Length"),
    S::debuff(debuffs::SONIC_BREAK, "Sonic Break"),
    S::debuff(debuffs::BOW_SHOCK, "Bow Shock"),
    S::debuff(debuffs::REPRISAL, "Reprisal"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CooldownGroup;

    #[test]
    fn gauge_deltas_match_cartridge_rules() {
        let delta = |id| {
            ABILITIES
                .iter()
                .find(|a| a.id == id)
                .and_then(|a| a.gauge)
                .map(|g| g.delta)
        };

        assert_eq!(delta(actions::SOLID_BARREL), Some(1));
        assert_eq!(delta(actions::BLOODFEST), Some(3));
        assert_eq!(delta(actions::GNASHING_FANG), Some(-1));
        assert_eq!(delta(actions::DOUBLE_DOWN), Some(-1));
        assert_eq!(delta(actions::KEEN_EDGE), None);
    }

    #[test]
    fn aurora_holds_two_charges() {
        let aurora = ABILITIES.iter().find(|a| a.id == actions::AURORA).unwrap();
        assert_eq!(
            aurora.cooldown,
            CooldownGroup::Recast {
                seconds: 60.0,
                max_charges: 2
            }
        );
        assert!(aurora.targets.contains(TargetClass::FRIENDLY));
    }

    #[test]
    fn status_ids_are_unique() {
        for (i, s) in STATUSES.iter().enumerate() {
            assert!(STATUSES[i + 1..].iter().all(|t| t.id != s.id));
        }
    }
}
