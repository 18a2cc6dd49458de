//! Static status effect metadata.

use crate::ids::StatusId;

/// Who a status effect lands on when its source applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusScope {
    /// Applied by the player to the player.
    SelfApplied,
    /// Applied by the player to the current target.
    OnTarget,
}

/// Immutable metadata for one status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusEffectDescriptor {
    pub id: StatusId,
    pub name: &'static str,
    pub scope: StatusScope,
}

impl StatusEffectDescriptor {
    pub const fn buff(id: StatusId, name: &'static str) -> Self {
        Self {
            id,
            name,
            scope: StatusScope::SelfApplied,
        }
    }

    pub const fn debuff(id: StatusId, name: &'static str) -> Self {
        Self {
            id,
            name,
            scope: StatusScope::OnTarget,
        }
    }
}
