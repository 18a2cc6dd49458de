//! Deterministic combat data model and condition predicates.
//!
//! `combat-core` defines the types every other crate agrees on: identifiers,
//! static ability/status descriptors, the per-tick [`CombatSnapshot`] supplied
//! by the game binding, engine tunables, and the opener script data types.
//! [`Conditions`] layers read-only predicates over one snapshot so a decision
//! never mixes readings taken at different instants.
pub mod ability;
pub mod conditions;
pub mod config;
pub mod env;
pub mod error;
pub mod ids;
pub mod opener;
pub mod snapshot;
pub mod status;

pub use ability::{AbilityDescriptor, CastKind, CooldownGroup, GaugeEffect, TargetClass};
pub use conditions::Conditions;
pub use config::{EngineConfig, OpenerTolerances, WeaveThresholds};
pub use env::AbilityOracle;
pub use error::CoreError;
pub use ids::{ActionId, GaugeKind, Job, Level, Seconds, StatusId, Timestamp};
pub use opener::{
    LevelBand, OpenerDefinition, OpenerOptions, OpenerStep, OpenerVariant, SkipRule,
    SpeedTier, SpeedTierThresholds, StartChoice,
};
pub use snapshot::{
    ActiveStatus, CombatSnapshot, ComboState, CooldownReading, GaugeReading, GcdTimer,
    PlayerState, StatusHolder, TargetKind, TargetState, UsedAction,
};
pub use status::{StatusEffectDescriptor, StatusScope};
