//! Static job content, the preset catalog and policy loaders.
//!
//! This crate houses the data the decision runtime reads but never mutates:
//! - Gunbreaker ability/status tables behind the `AbilityOracle` seam
//! - Action upgrade hooks and opener scripts
//! - The policy preset catalog and `PolicyConfig`
//! - TOML/RON loaders for policies, engine tunables and replay scenarios

pub mod gnb;
pub mod policy;
pub mod presets;
pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use gnb::{GNB, GnbContent};
pub use policy::{BossPolicy, GnbPolicy, OvercapChoice, PartyRequirement, PolicyConfig};
pub use presets::{ComboType, Preset, PresetInfo, TargetType};
pub use scenario::Scenario;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
