//! Per-tick view of live combat state.
//!
//! A [`CombatSnapshot`] is produced by the game binding once per evaluation
//! tick and is never mutated by the engine. Bounded collections keep the
//! snapshot allocation-free; the `with_*` builders silently drop entries past
//! capacity (matching how the client truncates its own lists), while the
//! `try_*` setters report [`CoreError::CapacityExceeded`].
//!
//! Absent data has a defined meaning: a cooldown that is not listed is ready,
//! a gauge that is not listed reads zero, and no target means every target
//! predicate is false.

use arrayvec::ArrayVec;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::ids::{ActionId, GaugeKind, Job, Level, Seconds, StatusId, Timestamp};

/// Read-only snapshot of everything the decision path may look at.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    /// Monotonic time at which the snapshot was taken.
    pub now: Timestamp,
    pub player: PlayerState,
    pub gcd: GcdTimer,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<TargetState>,
    /// Hostile actors within the player's immediate reach.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nearby_enemies: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub combo: ComboState,
    #[cfg_attr(feature = "serde", serde(default))]
    gauges: ArrayVec<GaugeReading, { EngineConfig::MAX_GAUGES }>,
    #[cfg_attr(feature = "serde", serde(default))]
    cooldowns: ArrayVec<CooldownReading, { EngineConfig::MAX_COOLDOWNS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    statuses: ArrayVec<ActiveStatus, { EngineConfig::MAX_STATUS_EFFECTS }>,
    /// Recently executed actions, oldest first.
    #[cfg_attr(feature = "serde", serde(default))]
    history: ArrayVec<UsedAction, { EngineConfig::MAX_HISTORY }>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub job: Job,
    pub level: Level,
    /// Current HP as a percentage (0-100).
    pub hp_percent: f32,
    pub in_combat: bool,
    pub in_party: bool,
    /// Adjusted recast of the job's base attack, used for speed-tier bucketing.
    pub base_recast: Seconds,
}

/// Global cooldown timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GcdTimer {
    /// Time until the next GCD action can be used. Zero when idle.
    pub remaining: Seconds,
    /// Length of the currently rolling GCD.
    pub total: Seconds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    Hostile,
    Friendly,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetState {
    pub kind: TargetKind,
    /// Target HP as a percentage (0-100).
    pub hp_percent: f32,
    pub in_melee_range: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_boss: bool,
}

/// The client's basic-combo tracker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboState {
    /// Last action that advanced the basic combo.
    pub last: Option<ActionId>,
    /// Time left before the combo resets.
    pub remaining: Seconds,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeReading {
    pub kind: GaugeKind,
    pub value: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownReading {
    pub action: ActionId,
    /// Time until the action (or its next charge) is available.
    pub remaining: Seconds,
    /// Charges usable right now.
    pub charges: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusHolder {
    Player,
    Target,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveStatus {
    pub id: StatusId,
    pub holder: StatusHolder,
    pub remaining: Seconds,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stacks: u8,
    /// Whether the player applied this status.
    pub from_player: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsedAction {
    pub action: ActionId,
    pub at: Timestamp,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            job: Job::Gunbreaker,
            level: 1,
            hp_percent: 100.0,
            in_combat: false,
            in_party: false,
            base_recast: 2.5,
        }
    }
}

impl Default for CombatSnapshot {
    fn default() -> Self {
        Self {
            now: 0.0,
            player: PlayerState::default(),
            gcd: GcdTimer::default(),
            target: None,
            nearby_enemies: 0,
            combo: ComboState::default(),
            gauges: ArrayVec::new(),
            cooldowns: ArrayVec::new(),
            statuses: ArrayVec::new(),
            history: ArrayVec::new(),
        }
    }
}

impl TargetState {
    /// A hostile target standing in melee range at the given HP.
    pub fn hostile(hp_percent: f32) -> Self {
        Self {
            kind: TargetKind::Hostile,
            hp_percent,
            in_melee_range: true,
            is_boss: false,
        }
    }

    pub fn friendly(hp_percent: f32) -> Self {
        Self {
            kind: TargetKind::Friendly,
            hp_percent,
            in_melee_range: true,
            is_boss: false,
        }
    }

    pub fn out_of_melee(mut self) -> Self {
        self.in_melee_range = false;
        self
    }

    pub fn boss(mut self) -> Self {
        self.is_boss = true;
        self
    }
}

impl CombatSnapshot {
    /// Creates an out-of-combat snapshot for the given job and level.
    pub fn new(job: Job, level: Level) -> Self {
        let mut snapshot = Self::default();
        snapshot.player.job = job;
        snapshot.player.level = level;
        snapshot
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn at(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    pub fn in_combat(mut self) -> Self {
        self.player.in_combat = true;
        self
    }

    pub fn in_party(mut self) -> Self {
        self.player.in_party = true;
        self
    }

    pub fn with_hp(mut self, hp_percent: f32) -> Self {
        self.player.hp_percent = hp_percent;
        self
    }

    pub fn with_base_recast(mut self, recast: Seconds) -> Self {
        self.player.base_recast = recast;
        self
    }

    pub fn with_target(mut self, target: TargetState) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_nearby_enemies(mut self, count: u8) -> Self {
        self.nearby_enemies = count;
        self
    }

    pub fn with_gcd(mut self, remaining: Seconds, total: Seconds) -> Self {
        self.gcd = GcdTimer { remaining, total };
        self
    }

    pub fn with_combo(mut self, last: ActionId, remaining: Seconds) -> Self {
        self.combo = ComboState {
            last: Some(last),
            remaining,
        };
        self
    }

    /// Sets a gauge reading. A new kind past `MAX_GAUGES` is dropped; use
    /// [`Self::try_set_gauge`] to be told.
    pub fn with_gauge(mut self, kind: GaugeKind, value: u8) -> Self {
        let _ = self.try_set_gauge(kind, value);
        self
    }

    /// Marks an action as recasting with no charge available.
    ///
    /// A new action past `MAX_COOLDOWNS` is dropped and so reads as ready.
    pub fn with_cooldown(mut self, action: ActionId, remaining: Seconds) -> Self {
        let _ = self.try_set_cooldown(CooldownReading {
            action,
            remaining,
            charges: 0,
        });
        self
    }

    /// Marks a charged action as recharging with `charges` still usable.
    /// Dropped past `MAX_COOLDOWNS` like [`Self::with_cooldown`].
    pub fn with_charges(mut self, action: ActionId, remaining: Seconds, charges: u8) -> Self {
        let _ = self.try_set_cooldown(CooldownReading {
            action,
            remaining,
            charges,
        });
        self
    }

    /// Adds a status on the player. Dropped past `MAX_STATUS_EFFECTS`.
    pub fn with_player_status(mut self, id: StatusId, remaining: Seconds) -> Self {
        let _ = self.try_push_status(ActiveStatus {
            id,
            holder: StatusHolder::Player,
            remaining,
            stacks: 0,
            from_player: true,
        });
        self
    }

    /// Adds a status on the target. Shares the status list with the player,
    /// so it is dropped past `MAX_STATUS_EFFECTS` too.
    pub fn with_target_status(mut self, id: StatusId, remaining: Seconds, from_player: bool) -> Self {
        let _ = self.try_push_status(ActiveStatus {
            id,
            holder: StatusHolder::Target,
            remaining,
            stacks: 0,
            from_player,
        });
        self
    }

    /// Never drops: a full history evicts its oldest entry instead.
    pub fn with_used(mut self, action: ActionId, at: Timestamp) -> Self {
        self.record_use(action, at);
        self
    }

    // ========================================================================
    // Fallible setters (used by game bindings)
    // ========================================================================

    /// Sets a gauge value, replacing any previous reading of the same kind.
    pub fn try_set_gauge(&mut self, kind: GaugeKind, value: u8) -> Result<(), CoreError> {
        if let Some(existing) = self.gauges.iter_mut().find(|g| g.kind == kind) {
            existing.value = value;
            return Ok(());
        }
        self.gauges
            .try_push(GaugeReading { kind, value })
            .map_err(|_| CoreError::CapacityExceeded {
                collection: "gauges",
                capacity: EngineConfig::MAX_GAUGES,
            })
    }

    /// Sets a cooldown reading, replacing any previous reading for the action.
    pub fn try_set_cooldown(&mut self, reading: CooldownReading) -> Result<(), CoreError> {
        if let Some(existing) = self
            .cooldowns
            .iter_mut()
            .find(|c| c.action == reading.action)
        {
            *existing = reading;
            return Ok(());
        }
        self.cooldowns
            .try_push(reading)
            .map_err(|_| CoreError::CapacityExceeded {
                collection: "cooldowns",
                capacity: EngineConfig::MAX_COOLDOWNS,
            })
    }

    pub fn try_push_status(&mut self, status: ActiveStatus) -> Result<(), CoreError> {
        self.statuses
            .try_push(status)
            .map_err(|_| CoreError::CapacityExceeded {
                collection: "statuses",
                capacity: EngineConfig::MAX_STATUS_EFFECTS,
            })
    }

    /// Appends to the action history, evicting the oldest entry when full.
    pub fn record_use(&mut self, action: ActionId, at: Timestamp) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(UsedAction { action, at });
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Gauge value, zero when the client did not report it.
    pub fn gauge(&self, kind: GaugeKind) -> u8 {
        self.gauges
            .iter()
            .find(|g| g.kind == kind)
            .map_or(0, |g| g.value)
    }

    /// Cooldown reading for an action. `None` means the action is fully ready.
    pub fn cooldown(&self, action: ActionId) -> Option<&CooldownReading> {
        self.cooldowns.iter().find(|c| c.action == action)
    }

    pub fn statuses(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.statuses.iter().filter(|s| s.remaining > 0.0)
    }

    /// Action history, oldest first.
    pub fn history(&self) -> &[UsedAction] {
        &self.history
    }

    /// The most recently used action, if any.
    pub fn last_used(&self) -> Option<&UsedAction> {
        self.history
            .iter()
            .max_by(|a, b| a.at.total_cmp(&b.at))
    }

    /// Checks that every timer is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.now.is_finite() {
            return Err(CoreError::NonFinite { field: "now" });
        }
        finite("gcd.remaining", self.gcd.remaining)?;
        finite("gcd.total", self.gcd.total)?;
        finite("player.hp_percent", self.player.hp_percent)?;
        finite("combo.remaining", self.combo.remaining)?;
        if !(self.player.base_recast.is_finite() && self.player.base_recast > 0.0) {
            return Err(CoreError::InvalidRecast(self.player.base_recast));
        }
        if let Some(target) = &self.target {
            finite("target.hp_percent", target.hp_percent)?;
        }
        for cd in &self.cooldowns {
            finite("cooldown.remaining", cd.remaining)?;
            if cd.remaining < 0.0 {
                return Err(CoreError::NegativeCooldown {
                    action: cd.action,
                    remaining: cd.remaining,
                });
            }
        }
        for status in &self.statuses {
            finite("status.remaining", status.remaining)?;
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), CoreError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CoreError::NonFinite { field })
    }
}
