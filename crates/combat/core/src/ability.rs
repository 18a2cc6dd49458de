//! Static ability metadata.
//!
//! Descriptors are loaded once from the content tables and never change while
//! the engine runs. They answer the questions the predicates cannot read from
//! a snapshot: required level, whether an action rides the global cooldown,
//! how many charges it holds, and what it does to the job gauge.

use bitflags::bitflags;

use crate::ids::{ActionId, GaugeKind, Level, Seconds};

bitflags! {
    /// Classes of targets an ability may be used on.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TargetClass: u8 {
        const SELF = 1 << 0;
        const HOSTILE = 1 << 1;
        const PARTY = 1 << 2;
        const ALLIANCE = 1 << 3;
        const FRIENDLY = 1 << 4;
    }
}

/// Which timer gates an ability.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CooldownGroup {
    /// Shares the global cooldown.
    Global,
    /// Rides the global cooldown but also has its own recast (e.g. Gnashing Fang).
    GlobalWithRecast { seconds: Seconds },
    /// Off-global-cooldown ability with its own recast timer.
    Recast { seconds: Seconds, max_charges: u8 },
}

/// How the ability is executed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CastKind {
    Instant,
    Channeled { cast_time: Seconds },
}

/// Effect an ability has on a job gauge when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GaugeEffect {
    pub kind: GaugeKind,
    pub delta: i8,
}

/// Immutable metadata for one game action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbilityDescriptor {
    pub id: ActionId,
    pub name: &'static str,
    pub level: Level,
    pub cooldown: CooldownGroup,
    pub cast: CastKind,
    /// Maximum distance to the target, in yalms. Zero for self-centered actions.
    pub range: u8,
    /// Effect radius in yalms. Zero for single-target actions.
    pub radius: u8,
    pub targets: TargetClass,
    pub gauge: Option<GaugeEffect>,
}

impl AbilityDescriptor {
    /// Creates an instant, single-target, global-cooldown descriptor.
    pub const fn gcd(id: ActionId, name: &'static str, level: Level) -> Self {
        Self {
            id,
            name,
            level,
            cooldown: CooldownGroup::Global,
            cast: CastKind::Instant,
            range: 3,
            radius: 0,
            targets: TargetClass::HOSTILE,
            gauge: None,
        }
    }

    /// Creates an instant off-global-cooldown descriptor with one charge.
    pub const fn ogcd(id: ActionId, name: &'static str, level: Level, recast: Seconds) -> Self {
        Self {
            id,
            name,
            level,
            cooldown: CooldownGroup::Recast {
                seconds: recast,
                max_charges: 1,
            },
            cast: CastKind::Instant,
            range: 0,
            radius: 0,
            targets: TargetClass::SELF,
            gauge: None,
        }
    }

    pub const fn with_recast_on_gcd(mut self, seconds: Seconds) -> Self {
        self.cooldown = CooldownGroup::GlobalWithRecast { seconds };
        self
    }

    pub const fn with_charges(mut self, max_charges: u8) -> Self {
        if let CooldownGroup::Recast { seconds, .. } = self.cooldown {
            self.cooldown = CooldownGroup::Recast {
                seconds,
                max_charges,
            };
        }
        self
    }

    pub const fn with_range(mut self, range: u8) -> Self {
        self.range = range;
        self
    }

    pub const fn with_radius(mut self, radius: u8) -> Self {
        self.radius = radius;
        self
    }

    pub const fn with_targets(mut self, targets: TargetClass) -> Self {
        self.targets = targets;
        self
    }

    pub const fn with_gauge(mut self, kind: GaugeKind, delta: i8) -> Self {
        self.gauge = Some(GaugeEffect { kind, delta });
        self
    }

    /// Returns `true` if using this action consumes the global cooldown.
    pub const fn is_gcd(&self) -> bool {
        matches!(
            self.cooldown,
            CooldownGroup::Global | CooldownGroup::GlobalWithRecast { .. }
        )
    }

    /// Own recast length, if the ability has one beyond the global cooldown.
    pub const fn recast(&self) -> Option<Seconds> {
        match self.cooldown {
            CooldownGroup::Global => None,
            CooldownGroup::GlobalWithRecast { seconds } => Some(seconds),
            CooldownGroup::Recast { seconds, .. } => Some(seconds),
        }
    }

    pub const fn max_charges(&self) -> u8 {
        match self.cooldown {
            CooldownGroup::Recast { max_charges, .. } => max_charges,
            _ => 1,
        }
    }

    /// Returns `true` when the recast is long enough that a use is always
    /// visible in the next snapshot.
    pub fn has_tracked_cooldown(&self) -> bool {
        self.recast().is_some_and(|s| s >= 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ogcd_builder_keeps_recast_when_adding_charges() {
        let aurora = AbilityDescriptor::ogcd(ActionId(16151), "Aurora", 45, 60.0).with_charges(2);

        assert_eq!(aurora.max_charges(), 2);
        assert_eq!(aurora.recast(), Some(60.0));
        assert!(!aurora.is_gcd());
        assert!(aurora.has_tracked_cooldown());
    }

    #[test]
    fn gcd_with_recast_counts_as_gcd() {
        let fang = AbilityDescriptor::gcd(ActionId(16146), "Gnashing Fang", 60)
            .with_recast_on_gcd(30.0)
            .with_gauge(GaugeKind::Cartridges, -1);

        assert!(fang.is_gcd());
        assert_eq!(fang.recast(), Some(30.0));
        assert_eq!(fang.gauge.map(|g| g.delta), Some(-1));
    }

    #[test]
    fn short_recasts_are_not_tracked() {
        let rip = AbilityDescriptor::ogcd(ActionId(16156), "Jugular Rip", 70, 1.0);
        assert!(!rip.has_tracked_cooldown());
    }
}
