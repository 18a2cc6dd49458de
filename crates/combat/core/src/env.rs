//! Read-only static data seam.
//!
//! The oracle exposes the immutable ability and status tables. Predicates use
//! it to answer level and recast questions a live snapshot cannot.

use crate::ability::AbilityDescriptor;
use crate::ids::{ActionId, StatusId};
use crate::status::StatusEffectDescriptor;

/// Lookup of static ability and status metadata for one job.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: ActionId) -> Option<&AbilityDescriptor>;

    fn status(&self, id: StatusId) -> Option<&StatusEffectDescriptor>;
}
