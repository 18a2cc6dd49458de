//! Boundary to the game client.
//!
//! The engine never talks to the game directly. A [`GameBinding`] hands it
//! one consistent snapshot per tick and executes whatever it decides.
use combat_core::{ActionId, CombatSnapshot};

/// Trait for the live game-state binding.
///
/// Different implementations can handle:
/// - The real client hook
/// - Recorded scenarios replayed offline
/// - Testing fixtures
pub trait GameBinding {
    /// Reads every field of the current game state at one instant.
    fn snapshot(&mut self) -> CombatSnapshot;

    /// Submits an action. Fire-and-forget: the outcome shows up in a later
    /// snapshot, never as a return value.
    fn submit(&mut self, action: ActionId);
}

/// Binding that replays a fixed list of snapshots and records submissions.
#[derive(Debug, Default)]
pub struct ReplayBinding {
    ticks: std::collections::VecDeque<CombatSnapshot>,
    last: CombatSnapshot,
    submitted: Vec<ActionId>,
}

impl ReplayBinding {
    pub fn new(ticks: impl IntoIterator<Item = CombatSnapshot>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
            last: CombatSnapshot::default(),
            submitted: Vec::new(),
        }
    }

    /// Snapshots not yet handed out.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }

    pub fn submitted(&self) -> &[ActionId] {
        &self.submitted
    }
}

impl GameBinding for ReplayBinding {
    /// Hands out the next recorded tick, repeating the last one once the
    /// recording is exhausted.
    fn snapshot(&mut self) -> CombatSnapshot {
        if let Some(next) = self.ticks.pop_front() {
            self.last = next;
        }
        self.last.clone()
    }

    fn submit(&mut self, action: ActionId) {
        self.submitted.push(action);
    }
}
