//! Opener script data.
//!
//! An [`OpenerDefinition`] is a plain data value: the ordered steps, the
//! speed tiers and level band it applies to, the readiness it requires before
//! it may start, and which steps may be skipped or delayed. The state machine
//! that plays it lives in the runtime; one machine type serves every script.

use crate::ability::AbilityDescriptor;
use crate::conditions::Conditions;
use crate::env::AbilityOracle;
use crate::ids::{ActionId, GaugeKind, Level, Seconds};

/// Recast-speed bucket derived from the adjusted base-attack recast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedTier {
    Fast,
    Mid,
    Slow,
}

/// Tier boundaries: `recast < mid_at` is fast, `recast >= slow_at` is slow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedTierThresholds {
    pub mid_at: Seconds,
    pub slow_at: Seconds,
}

impl SpeedTierThresholds {
    /// Buckets a recast time. Returns `None` for non-positive or non-finite input.
    pub fn bucket(&self, recast: Seconds) -> Option<SpeedTier> {
        if !recast.is_finite() || recast <= 0.0 {
            return None;
        }
        Some(if recast >= self.slow_at {
            SpeedTier::Slow
        } else if recast >= self.mid_at {
            SpeedTier::Mid
        } else {
            SpeedTier::Fast
        })
    }
}

/// Inclusive character-level range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelBand {
    pub min: Level,
    pub max: Level,
}

impl LevelBand {
    pub const fn new(min: Level, max: Level) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, level: Level) -> bool {
        level >= self.min && level <= self.max
    }
}

/// Burst placement the user picked for the opener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpenerVariant {
    /// Burst after the first basic combo.
    #[default]
    Normal,
    /// Burst right after the pull.
    Early,
}

/// How the pull begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartChoice {
    /// Pull with the ranged attack.
    #[default]
    Ranged,
    /// Start already in melee range, skipping the ranged pull.
    Melee,
}

/// User options consulted while selecting and playing an opener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenerOptions {
    pub variant: OpenerVariant,
    pub start_choice: StartChoice,
}

/// One scripted action and the gauge value expected once it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenerStep {
    pub action: ActionId,
    pub expect_gauge: Option<(GaugeKind, u8)>,
}

/// Step indices skipped when `when` holds for the current options.
#[derive(Clone, Copy, Debug)]
pub struct SkipRule {
    pub steps: &'static [usize],
    pub when: fn(&OpenerOptions) -> bool,
}

#[derive(Clone, Debug)]
pub struct OpenerDefinition {
    pub name: &'static str,
    pub tiers: &'static [SpeedTier],
    pub variant: OpenerVariant,
    pub band: LevelBand,
    pub steps: Vec<OpenerStep>,
    /// Actions that must be fully off cooldown for the opener to start.
    pub ready_actions: &'static [ActionId],
    /// Gauges that must read zero for the opener to start.
    pub empty_gauges: &'static [GaugeKind],
    pub skip_rules: Vec<SkipRule>,
    /// Off-GCD steps allowed to fire after the normal weave window closed.
    pub delay_tolerant_steps: &'static [usize],
}

impl OpenerDefinition {
    /// Builds a definition with no gauge expectations from a list of actions.
    pub fn new(
        name: &'static str,
        tiers: &'static [SpeedTier],
        variant: OpenerVariant,
        band: LevelBand,
        actions: &[ActionId],
    ) -> Self {
        Self {
            name,
            tiers,
            variant,
            band,
            steps: actions
                .iter()
                .map(|&action| OpenerStep {
                    action,
                    expect_gauge: None,
                })
                .collect(),
            ready_actions: &[],
            empty_gauges: &[],
            skip_rules: Vec::new(),
            delay_tolerant_steps: &[],
        }
    }

    pub fn requiring(
        mut self,
        ready_actions: &'static [ActionId],
        empty_gauges: &'static [GaugeKind],
    ) -> Self {
        self.ready_actions = ready_actions;
        self.empty_gauges = empty_gauges;
        self
    }

    pub fn skipping(mut self, rule: SkipRule) -> Self {
        self.skip_rules.push(rule);
        self
    }

    pub fn delay_tolerant(mut self, steps: &'static [usize]) -> Self {
        self.delay_tolerant_steps = steps;
        self
    }

    /// Derives the expected gauge value after every step that changes `kind`.
    ///
    /// The gauge starts empty (see [`Self::empty_gauges`]) and is clamped to
    /// `0..=max` the same way the client clamps it.
    pub fn tracking_gauge(mut self, oracle: &dyn AbilityOracle, kind: GaugeKind, max: u8) -> Self {
        let mut value: i16 = 0;
        for step in &mut self.steps {
            let effect = oracle
                .ability(step.action)
                .and_then(|a: &AbilityDescriptor| a.gauge)
                .filter(|g| g.kind == kind);
            if let Some(effect) = effect {
                value = (value + i16::from(effect.delta)).clamp(0, i16::from(max));
                step.expect_gauge = Some((kind, value as u8));
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Option<&OpenerStep> {
        self.steps.get(index)
    }

    /// Returns `true` if this script applies to the tier, level and variant.
    pub fn matches(&self, tier: SpeedTier, level: Level, variant: OpenerVariant) -> bool {
        self.variant == variant && self.band.contains(level) && self.tiers.contains(&tier)
    }

    /// All tracked cooldowns full and all tracked gauges empty.
    pub fn preconditions_met(&self, cond: &Conditions<'_>) -> bool {
        self.ready_actions.iter().all(|&a| cond.is_off_cooldown(a))
            && self.empty_gauges.iter().all(|&g| cond.gauge(g) == 0)
    }

    pub fn is_skipped(&self, index: usize, options: &OpenerOptions) -> bool {
        self.skip_rules
            .iter()
            .any(|rule| rule.steps.contains(&index) && (rule.when)(options))
    }

    pub fn is_delay_tolerant(&self, index: usize) -> bool {
        self.delay_tolerant_steps.contains(&index)
    }
}
