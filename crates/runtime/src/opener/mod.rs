//! Opener state machine.
//!
//! One [`OpenerRun`] plays any [`OpenerDefinition`]: it selects a script when
//! combat starts, exposes the step at the cursor, and advances only when the
//! action shows up in the snapshot's action history. Anything that fails to
//! materialize (a cooldown that should be rolling, a cartridge count that
//! does not line up, a step that never comes) ends the run for good.
//!
//! ```text
//! Inactive -> (select) -> Playing(step) -> Finished(Completed | Aborted)
//! ```

pub mod select;

use std::fmt;
use std::sync::Arc;

use combat_core::{
    ActionId, Conditions, EngineConfig, GaugeKind, OpenerDefinition, OpenerOptions,
    SpeedTierThresholds, Timestamp,
};
use tracing::{debug, info, warn};

/// Why an opener stopped before its last step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerAbort {
    /// A tracked cooldown or gauge was not in its starting state.
    PreconditionNotMet,
    /// No script covers this tier, level and variant.
    NoMatchingDefinition,
    /// The step was used but its cooldown is not rolling.
    CooldownMismatch { step: usize, action: ActionId },
    /// The gauge disagrees with the script after a step.
    GaugeMismatch {
        step: usize,
        kind: GaugeKind,
        expected: u8,
        found: u8,
    },
    /// The step was not observed within the step timeout.
    StepTimedOut { step: usize },
    /// An off-GCD step lost its weave window.
    WeaveWindowMissed { step: usize },
    /// Stopped from outside, e.g. the combo button changed.
    Cancelled,
}

impl fmt::Display for OpenerAbort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenerAbort::PreconditionNotMet => write!(f, "preconditions not met"),
            OpenerAbort::NoMatchingDefinition => write!(f, "no matching opener"),
            OpenerAbort::CooldownMismatch { step, action } => {
                write!(f, "step {} used {:?} but its cooldown is not rolling", step, action)
            }
            OpenerAbort::GaugeMismatch {
                step,
                kind,
                expected,
                found,
            } => write!(
                f,
                "step {} expected {} {} but found {}",
                step, expected, kind, found
            ),
            OpenerAbort::StepTimedOut { step } => write!(f, "step {} timed out", step),
            OpenerAbort::WeaveWindowMissed { step } => {
                write!(f, "step {} missed its weave window", step)
            }
            OpenerAbort::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerOutcome {
    Completed,
    Aborted(OpenerAbort),
}

/// What the opener wants this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerOutput {
    /// Press the scripted action.
    Play { action: ActionId, step: usize },
    /// The next step is not due yet; press nothing.
    Hold { step: usize },
    /// The opener is over; the rotation takes control.
    Finished(OpenerOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum OpenerState {
    Inactive,
    Playing {
        definition: usize,
        step: usize,
        /// Time of the last observed step (or the pull, before the first).
        since: Timestamp,
        /// Whether a use exactly at `since` counts. Only before the first step.
        inclusive: bool,
    },
    Finished(OpenerOutcome),
}

/// One engagement's opener.
#[derive(Clone, Debug)]
pub struct OpenerRun {
    catalog: Arc<[OpenerDefinition]>,
    thresholds: SpeedTierThresholds,
    state: OpenerState,
}

impl OpenerRun {
    pub fn new(catalog: Arc<[OpenerDefinition]>, thresholds: SpeedTierThresholds) -> Self {
        Self {
            catalog,
            thresholds,
            state: OpenerState::Inactive,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, OpenerState::Finished(_))
    }

    pub fn outcome(&self) -> Option<OpenerOutcome> {
        match self.state {
            OpenerState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The script being played, if any.
    pub fn definition(&self) -> Option<&OpenerDefinition> {
        match self.state {
            OpenerState::Playing { definition, .. } => self.catalog.get(definition),
            _ => None,
        }
    }

    /// The cursor, while playing.
    pub fn step(&self) -> Option<usize> {
        match self.state {
            OpenerState::Playing { step, .. } => Some(step),
            _ => None,
        }
    }

    /// Aborts immediately. Returns `false` if the run was already over.
    pub fn cancel(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.abort(OpenerAbort::Cancelled);
        true
    }

    /// Advances the machine against one snapshot.
    ///
    /// Call once per tick while in combat. Selection happens on the first call.
    pub fn tick(
        &mut self,
        cond: &Conditions<'_>,
        options: &OpenerOptions,
        engine: &EngineConfig,
    ) -> OpenerOutput {
        if let OpenerState::Finished(outcome) = self.state {
            return OpenerOutput::Finished(outcome);
        }

        if self.state == OpenerState::Inactive {
            match select::select(&self.catalog, &self.thresholds, cond, options) {
                Ok(definition) => {
                    let def = &self.catalog[definition];
                    info!("Opener started: {} ({} steps)", def.name, def.len());
                    self.state = OpenerState::Playing {
                        definition,
                        step: select::next_step(def, 0, options),
                        since: cond.snapshot().now - f64::from(engine.opener.prepull_grace),
                        inclusive: true,
                    };
                }
                Err(reason) => return self.abort(reason),
            }
        }

        let catalog = Arc::clone(&self.catalog);
        let OpenerState::Playing {
            definition,
            mut step,
            mut since,
            mut inclusive,
        } = self.state
        else {
            return OpenerOutput::Finished(OpenerOutcome::Completed);
        };
        let def = &catalog[definition];

        // Consume every step the history shows, oldest first.
        let mut gauge_check = None;
        while step < def.len() {
            let Some(expected) = def.step(step) else {
                break;
            };
            let used = cond.snapshot().history().iter().find(|used| {
                used.action == expected.action
                    && (used.at > since || (inclusive && used.at == since))
            });
            let Some(used) = used else {
                break;
            };

            let tracked = cond
                .ability(expected.action)
                .is_some_and(|ability| ability.has_tracked_cooldown());
            if tracked && cond.is_off_cooldown(expected.action) {
                return self.abort(OpenerAbort::CooldownMismatch {
                    step,
                    action: expected.action,
                });
            }
            if let Some((kind, value)) = expected.expect_gauge {
                gauge_check = Some((step, kind, value));
            }

            debug!("Opener step {} observed ({:?})", step, expected.action);
            since = used.at;
            inclusive = false;
            step = select::next_step(def, step + 1, options);
        }

        // The gauge only reflects the latest step, so check that one.
        if let Some((checked, kind, expected)) = gauge_check {
            let found = cond.gauge(kind);
            if found != expected {
                return self.abort(OpenerAbort::GaugeMismatch {
                    step: checked,
                    kind,
                    expected,
                    found,
                });
            }
        }

        if step >= def.len() {
            info!("Opener completed: {}", def.name);
            self.state = OpenerState::Finished(OpenerOutcome::Completed);
            return OpenerOutput::Finished(OpenerOutcome::Completed);
        }

        self.state = OpenerState::Playing {
            definition,
            step,
            since,
            inclusive,
        };

        let now = cond.snapshot().now;
        if now - since > f64::from(engine.opener.step_timeout) {
            return self.abort(OpenerAbort::StepTimedOut { step });
        }

        let Some(current) = def.step(step) else {
            return self.abort(OpenerAbort::StepTimedOut { step });
        };
        let off_gcd = cond
            .ability(current.action)
            .is_some_and(|ability| !ability.is_gcd());
        if off_gcd {
            let weave = engine.weave;
            if def.is_delay_tolerant(step) {
                if cond.gcd_remaining() >= weave.late_weave_start {
                    return OpenerOutput::Hold { step };
                }
            } else if !cond.gcd_idle() && !cond.can_weave(weave.min_weave) {
                return self.abort(OpenerAbort::WeaveWindowMissed { step });
            }
        }

        OpenerOutput::Play {
            action: current.action,
            step,
        }
    }

    fn abort(&mut self, reason: OpenerAbort) -> OpenerOutput {
        match reason {
            OpenerAbort::PreconditionNotMet | OpenerAbort::NoMatchingDefinition => {
                info!("Opener skipped: {}", reason)
            }
            _ => warn!("Opener aborted: {}", reason),
        }
        let outcome = OpenerOutcome::Aborted(reason);
        self.state = OpenerState::Finished(outcome);
        OpenerOutput::Finished(outcome)
    }
}
