//! Rotation decision function.
//!
//! [`decide`] turns one snapshot and one policy into at most one action for a
//! [`Role`]. Domains are consulted in a fixed precedence; the first table with
//! a matching entry decides, otherwise the role's base combo action is used.
//!
//! | mode | precedence |
//! |---|---|
//! | single target | mitigation, off-GCD burst, ranged uptime, GCD spenders, base combo |
//! | multi target | off-GCD burst, GCD spenders, area combo |
//! | mitigation | prioritized mitigation, the button's own action |
//!
//! The opener is consulted before any of this by [`crate::Engine`], since it
//! is the only stateful piece of the decision.

pub mod cache;
pub mod gnb;

use combat_content::{ComboType, PolicyConfig, Preset, TargetType};
use combat_core::{ActionId, CombatSnapshot, EngineConfig, Job};
use rule_table::RuleTable;
use tracing::debug;

pub use cache::{RoleTables, RuleCache};

use crate::context::DecisionContext;

pub type GnbTable = RuleTable<DecisionContext>;

/// Which button the player is pressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    SingleTarget,
    MultiTarget,
    Mitigation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Role {
    pub job: Job,
    pub mode: Mode,
}

impl Role {
    pub const fn new(job: Job, mode: Mode) -> Self {
        Self { job, mode }
    }

    /// The role a combo (or any option under it) drives.
    pub fn from_preset(preset: Preset) -> Option<Self> {
        let info = preset.root().info();
        let mode = match (info.combo_type, info.target_type) {
            (ComboType::Simple | ComboType::Advanced, TargetType::SingleTarget) => Mode::SingleTarget,
            (ComboType::Simple | ComboType::Advanced, TargetType::MultiTarget) => Mode::MultiTarget,
            (ComboType::Other, TargetType::Other) => Mode::Mitigation,
            _ => return None,
        };
        Some(Self::new(info.job, mode))
    }

    /// The Simple and Advanced combo presets of this role.
    pub fn combos(self) -> (Option<Preset>, Option<Preset>) {
        let find = |target, combo_type| Preset::combo(self.job, target, combo_type);
        match self.mode {
            Mode::SingleTarget => (
                find(TargetType::SingleTarget, ComboType::Simple),
                find(TargetType::SingleTarget, ComboType::Advanced),
            ),
            Mode::MultiTarget => (
                find(TargetType::MultiTarget, ComboType::Simple),
                find(TargetType::MultiTarget, ComboType::Advanced),
            ),
            Mode::Mitigation => (None, find(TargetType::Other, ComboType::Other)),
        }
    }
}

/// The combo preset currently driving a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveCombo {
    /// Simple mode: every option of the role's advanced combo is on.
    Simple { simple: Preset, advanced: Option<Preset> },
    Advanced(Preset),
}

impl ActiveCombo {
    /// Simple wins over Advanced when both are enabled.
    pub fn resolve(role: Role, policy: &PolicyConfig) -> Option<Self> {
        let (simple, advanced) = role.combos();
        if let Some(simple) = simple.filter(|p| policy.is_enabled(*p)) {
            return Some(Self::Simple { simple, advanced });
        }
        advanced
            .filter(|p| policy.is_enabled(*p))
            .map(Self::Advanced)
    }

    pub fn preset(self) -> Preset {
        match self {
            Self::Simple { simple, .. } => simple,
            Self::Advanced(preset) => preset,
        }
    }

    /// Builds the tick's context with this combo's flag semantics.
    pub fn context(
        self,
        snapshot: CombatSnapshot,
        policy: PolicyConfig,
        engine: EngineConfig,
    ) -> DecisionContext {
        let ctx = DecisionContext::new(snapshot, policy, engine);
        match self {
            Self::Simple {
                advanced: Some(advanced),
                ..
            } => ctx.forcing_options(advanced),
            _ => ctx,
        }
    }
}

/// Rule domains, in the order a role may consult them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    Mitigation,
    OffGcd,
    Ranged,
    Gcd,
}

impl Domain {
    pub const fn as_str(self) -> &'static str {
        match self {
            Domain::Mitigation => "mitigation",
            Domain::OffGcd => "off_gcd",
            Domain::Ranged => "ranged",
            Domain::Gcd => "gcd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [Domain::Mitigation, Domain::OffGcd, Domain::Ranged, Domain::Gcd]
            .into_iter()
            .find(|domain| domain.as_str() == name)
    }
}

/// Why a decision came out the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionSource {
    /// A scripted opener step.
    Opener { step: usize },
    /// The first matching entry of a rule table.
    Rule {
        domain: Domain,
        rank: usize,
        rule: &'static str,
    },
    /// Ranged uptime while out of melee range.
    RangedFallback,
    /// No rule fired; the base combo action.
    BaseCombo,
    /// Nothing to press this tick. Not an error.
    NoEligibleAction,
}

/// The single outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: Option<ActionId>,
    pub source: DecisionSource,
}

impl Decision {
    pub const fn none() -> Self {
        Self {
            action: None,
            source: DecisionSource::NoEligibleAction,
        }
    }

    pub const fn opener(action: ActionId, step: usize) -> Self {
        Self {
            action: Some(action),
            source: DecisionSource::Opener { step },
        }
    }

    /// A scripted step that is not due yet; the opener keeps control.
    pub const fn opener_hold(step: usize) -> Self {
        Self {
            action: None,
            source: DecisionSource::Opener { step },
        }
    }

    pub fn is_none(&self) -> bool {
        self.action.is_none()
    }
}

/// Decides the next action for `role` without an opener.
///
/// Returns [`Decision::none`] when neither of the role's combos is enabled.
pub fn decide(
    cache: &mut RuleCache,
    role: Role,
    snapshot: &CombatSnapshot,
    policy: &PolicyConfig,
    engine: &EngineConfig,
) -> Decision {
    let Some(combo) = ActiveCombo::resolve(role, policy) else {
        debug!("{:?} has no enabled combo", role);
        return Decision::none();
    };
    let ctx = combo.context(snapshot.clone(), policy.clone(), engine.clone());
    evaluate(cache.tables(role), role, &ctx)
}

/// Walks the role's domains in precedence order.
pub fn evaluate(tables: &RoleTables, role: Role, ctx: &DecisionContext) -> Decision {
    for (domain, table) in tables.domains() {
        if let Some(selection) = table.evaluate(ctx) {
            let action = ctx.hook(selection.action);
            debug!(
                "{} selected {} (rank {}) -> {:?}",
                domain.as_str(),
                selection.rule,
                selection.rank,
                action
            );
            let source = match domain {
                Domain::Ranged => DecisionSource::RangedFallback,
                _ => DecisionSource::Rule {
                    domain,
                    rank: selection.rank,
                    rule: selection.rule,
                },
            };
            return Decision {
                action: Some(action),
                source,
            };
        }
    }

    let action = match role.job {
        Job::Gunbreaker => gnb::base_action(role.mode, ctx),
    };
    Decision {
        action: Some(ctx.hook(action)),
        source: DecisionSource::BaseCombo,
    }
}
