//! Decision context handed to the rule tables.
//!
//! The context owns everything one evaluation reads: the snapshot, the
//! effective policy (lease overrides already applied) and the engine
//! tunables. Owning rather than borrowing lets the cached tables outlive any
//! single tick.

use combat_content::gnb::{GNB, live_action};
use combat_content::{GnbPolicy, PolicyConfig, Preset};
use combat_core::{ActionId, CombatSnapshot, Conditions, EngineConfig, WeaveThresholds};
use rule_table::RuleContext;

#[derive(Clone, Debug)]
pub struct DecisionContext {
    snapshot: CombatSnapshot,
    policy: PolicyConfig,
    engine: EngineConfig,
    /// Combo whose options all count as enabled (Simple mode).
    forced: Option<Preset>,
}

impl DecisionContext {
    pub fn new(snapshot: CombatSnapshot, policy: PolicyConfig, engine: EngineConfig) -> Self {
        Self {
            snapshot,
            policy,
            engine,
            forced: None,
        }
    }

    /// Forces `combo` and every option under it on.
    pub fn forcing_options(mut self, combo: Preset) -> Self {
        self.forced = Some(combo);
        self
    }

    /// Predicate view over this tick's snapshot.
    pub fn cond(&self) -> Conditions<'_> {
        Conditions::new(&self.snapshot, &GNB)
    }

    pub fn snapshot(&self) -> &CombatSnapshot {
        &self.snapshot
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn gnb(&self) -> &GnbPolicy {
        &self.policy.gnb
    }

    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    pub fn weave(&self) -> WeaveThresholds {
        self.engine.weave
    }

    /// The id the client would execute for `action` right now.
    pub fn hook(&self, action: ActionId) -> ActionId {
        live_action(action, &self.cond())
    }

    pub fn preset_enabled(&self, preset: Preset) -> bool {
        self.forced.is_some_and(|combo| preset.root() == combo) || self.policy.is_enabled(preset)
    }
}

impl RuleContext for DecisionContext {
    type Action = ActionId;
    type Flag = Preset;

    fn flag_enabled(&self, flag: Preset) -> bool {
        self.preset_enabled(flag)
    }

    /// Rules name base actions; readiness is read from the upgraded action.
    fn action_usable(&self, action: ActionId) -> bool {
        let cond = self.cond();
        cond.level_checked(action) && cond.action_ready(live_action(action, &cond))
    }
}
