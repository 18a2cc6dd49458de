//! Identifier newtypes and small shared enums.

use strum::{Display, EnumIter};

/// Duration in seconds, as reported by the game client.
pub type Seconds = f32;

/// Monotonic timestamp in seconds. Only differences are meaningful.
pub type Timestamp = f64;

/// Character level.
pub type Level = u8;

/// Game action identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(pub u32);

/// Status effect identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusId(pub u16);

impl ActionId {
    /// Returns the raw game id.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl StatusId {
    /// Returns the raw game id.
    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// Combat job. Each job owns its own rule tables and opener scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Job {
    /// Gunbreaker (tank).
    #[strum(serialize = "GNB")]
    Gunbreaker,
}

impl Job {
    /// The game's numeric job id.
    pub const fn id(self) -> u8 {
        match self {
            Job::Gunbreaker => 37,
        }
    }
}

/// Job resource gauges read from the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GaugeKind {
    /// Gunbreaker powder cartridges.
    Cartridges,
    /// Position inside the Gnashing Fang / Reign of Beasts chains (0 = idle).
    AmmoComboStep,
}
