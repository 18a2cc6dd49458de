//! Condition predicates over one combat snapshot.
//!
//! [`Conditions`] pairs a single [`CombatSnapshot`] with the static
//! [`AbilityOracle`], so every predicate evaluated during one decision reads
//! the same instant. All predicates are total: missing data (no target, an
//! unknown action, an unreported gauge) evaluates to `false` or zero.

use crate::ability::AbilityDescriptor;
use crate::env::AbilityOracle;
use crate::ids::{ActionId, GaugeKind, Level, Seconds, StatusId};
use crate::snapshot::{CombatSnapshot, StatusHolder, TargetKind};

/// Read-only predicate view used by rule tables and the opener machine.
#[derive(Clone, Copy)]
pub struct Conditions<'a> {
    snapshot: &'a CombatSnapshot,
    oracle: &'a dyn AbilityOracle,
}

impl<'a> Conditions<'a> {
    pub fn new(snapshot: &'a CombatSnapshot, oracle: &'a dyn AbilityOracle) -> Self {
        Self { snapshot, oracle }
    }

    pub fn snapshot(&self) -> &'a CombatSnapshot {
        self.snapshot
    }

    pub fn ability(&self, action: ActionId) -> Option<&'a AbilityDescriptor> {
        self.oracle.ability(action)
    }

    // ========================================================================
    // Player
    // ========================================================================

    pub fn level(&self) -> Level {
        self.snapshot.player.level
    }

    pub fn level_at_least(&self, level: Level) -> bool {
        self.snapshot.player.level >= level
    }

    /// Returns `true` if the player's level unlocks the action.
    ///
    /// Unknown actions are never level-checked.
    pub fn level_checked(&self, action: ActionId) -> bool {
        self.oracle
            .ability(action)
            .is_some_and(|a| a.level <= self.snapshot.player.level)
    }

    pub fn player_hp_percent(&self) -> f32 {
        self.snapshot.player.hp_percent
    }

    pub fn in_combat(&self) -> bool {
        self.snapshot.player.in_combat
    }

    pub fn in_party(&self) -> bool {
        self.snapshot.player.in_party
    }

    pub fn base_recast(&self) -> Seconds {
        self.snapshot.player.base_recast
    }

    // ========================================================================
    // Cooldowns
    // ========================================================================

    pub fn cooldown_remaining(&self, action: ActionId) -> Seconds {
        self.snapshot
            .cooldown(action)
            .map_or(0.0, |c| c.remaining.max(0.0))
    }

    /// Charges usable right now. An unlisted action holds all its charges.
    pub fn remaining_charges(&self, action: ActionId) -> u8 {
        match self.snapshot.cooldown(action) {
            Some(reading) if reading.remaining > 0.0 => reading.charges,
            _ => self.oracle.ability(action).map_or(1, |a| a.max_charges()),
        }
    }

    /// Returns `true` when the action's recast is fully elapsed.
    pub fn is_off_cooldown(&self, action: ActionId) -> bool {
        self.cooldown_remaining(action) <= 0.0
    }

    pub fn is_on_cooldown(&self, action: ActionId) -> bool {
        !self.is_off_cooldown(action)
    }

    /// Level-checked and usable now (off cooldown or holding a charge).
    pub fn action_ready(&self, action: ActionId) -> bool {
        self.level_checked(action)
            && (self.is_off_cooldown(action) || self.remaining_charges(action) > 0)
    }

    // ========================================================================
    // Statuses
    // ========================================================================

    pub fn has_status(&self, id: StatusId) -> bool {
        self.status_remaining(id) > 0.0
    }

    /// Remaining duration of a status on the player, zero when absent.
    pub fn status_remaining(&self, id: StatusId) -> Seconds {
        self.snapshot
            .statuses()
            .filter(|s| s.id == id && s.holder == StatusHolder::Player)
            .map(|s| s.remaining)
            .fold(0.0, f32::max)
    }

    /// Returns `true` if the current target carries the status.
    ///
    /// With `from_player` set, only statuses the player applied count.
    pub fn target_has_status(&self, id: StatusId, from_player: bool) -> bool {
        self.snapshot.target.is_some()
            && self.snapshot.statuses().any(|s| {
                s.id == id && s.holder == StatusHolder::Target && (!from_player || s.from_player)
            })
    }

    // ========================================================================
    // Action history
    // ========================================================================

    /// Returns `true` if the action was used within the last `window` seconds.
    pub fn just_used(&self, action: ActionId, window: Seconds) -> bool {
        let now = self.snapshot.now;
        self.snapshot.history().iter().any(|used| {
            used.action == action && used.at <= now && now - used.at <= f64::from(window)
        })
    }

    /// Composite OR over several `just_used` windows.
    pub fn any_just_used(&self, checks: &[(ActionId, Seconds)]) -> bool {
        checks
            .iter()
            .any(|&(action, window)| self.just_used(action, window))
    }

    pub fn was_last_action(&self, action: ActionId) -> bool {
        self.snapshot
            .last_used()
            .is_some_and(|used| used.action == action)
    }

    /// The action that advanced the basic combo, if the combo is still live.
    pub fn combo_action(&self) -> Option<ActionId> {
        if self.snapshot.combo.remaining > 0.0 {
            self.snapshot.combo.last
        } else {
            None
        }
    }

    pub fn combo_timer(&self) -> Seconds {
        self.snapshot.combo.remaining.max(0.0)
    }

    // ========================================================================
    // Gauges
    // ========================================================================

    pub fn gauge(&self, kind: GaugeKind) -> u8 {
        self.snapshot.gauge(kind)
    }

    // ========================================================================
    // Target
    // ========================================================================

    pub fn has_target(&self) -> bool {
        self.snapshot.target.is_some()
    }

    /// Returns `true` if the current target is hostile.
    pub fn has_battle_target(&self) -> bool {
        self.snapshot
            .target
            .is_some_and(|t| t.kind == TargetKind::Hostile)
    }

    pub fn target_is_friendly(&self) -> bool {
        self.snapshot
            .target
            .is_some_and(|t| t.kind == TargetKind::Friendly)
    }

    pub fn in_melee_range(&self) -> bool {
        self.snapshot
            .target
            .is_some_and(|t| t.kind == TargetKind::Hostile && t.in_melee_range)
    }

    pub fn target_hp_percent(&self) -> f32 {
        self.snapshot.target.map_or(0.0, |t| t.hp_percent)
    }

    pub fn target_is_boss(&self) -> bool {
        self.snapshot.target.is_some_and(|t| t.is_boss)
    }

    pub fn nearby_enemies(&self) -> u8 {
        self.snapshot.nearby_enemies
    }

    // ========================================================================
    // Global cooldown / weaving
    // ========================================================================

    pub fn gcd_remaining(&self) -> Seconds {
        self.snapshot.gcd.remaining.max(0.0)
    }

    /// Returns `true` when no GCD is rolling.
    pub fn gcd_idle(&self) -> bool {
        self.gcd_remaining() <= 0.0
    }

    /// An off-GCD action fits before the next GCD without clipping it.
    ///
    /// Inclusive at `min`.
    pub fn can_weave(&self, min: Seconds) -> bool {
        self.gcd_remaining() >= min
    }

    /// The GCD is inside the late-weave band `[end, start)`.
    pub fn can_delayed_weave(&self, start: Seconds, end: Seconds) -> bool {
        let remaining = self.gcd_remaining();
        remaining >= end && remaining < start
    }
}
