//! The seam between a rule table and the state it is evaluated against.

use std::fmt::Debug;

/// Policy flags and action usability, as seen by one evaluation.
pub trait RuleContext {
    type Action: Copy + Eq + Debug;
    type Flag: Copy + Eq + Debug;

    /// Returns `true` if the user enabled the rule owning `flag`.
    fn flag_enabled(&self, flag: Self::Flag) -> bool;

    /// Returns `true` if `action` can be used right now (level and cooldown).
    fn action_usable(&self, action: Self::Action) -> bool;
}
