//! Snapshot validation errors.
//!
//! Predicates never fail: absent data reads as false or zero. The only thing
//! that can be wrong is the snapshot itself (non-finite timers from a broken
//! binding), and [`CombatSnapshot::validate`](crate::CombatSnapshot::validate)
//! reports that before any predicate runs.

use thiserror::Error;

use crate::ids::ActionId;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("snapshot field `{field}` is not a finite number")]
    NonFinite { field: &'static str },

    #[error("cooldown for action {action:?} is negative ({remaining})")]
    NegativeCooldown { action: ActionId, remaining: f32 },

    #[error("base recast {0} is not a positive duration")]
    InvalidRecast(f32),

    #[error("snapshot {collection} is full ({capacity} entries)")]
    CapacityExceeded {
        collection: &'static str,
        capacity: usize,
    },
}
