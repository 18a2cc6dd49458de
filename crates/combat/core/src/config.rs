use crate::ids::Seconds;

/// Engine tunables shared by the rotation tables and the opener machine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub weave: WeaveThresholds,
    pub opener: OpenerTolerances,
}

/// Latency buffers for fitting off-global-cooldown actions between GCDs.
///
/// These are network/animation allowances, not simulation ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaveThresholds {
    /// Minimum GCD time remaining for a normal weave.
    pub min_weave: Seconds,
    /// Upper edge of the late-weave band `[min_weave, late_weave_start)`.
    pub late_weave_start: Seconds,
}

/// How long the opener waits for the game to confirm a scripted step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OpenerTolerances {
    /// A step not observed within this window aborts the opener.
    pub step_timeout: Seconds,
    /// Actions used this long before combat began still count for step one.
    pub prepull_grace: Seconds,
}

impl EngineConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_GAUGES: usize = 4;
    pub const MAX_COOLDOWNS: usize = 48;
    pub const MAX_STATUS_EFFECTS: usize = 32;
    pub const MAX_HISTORY: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MIN_WEAVE: Seconds = 0.6;
    pub const DEFAULT_LATE_WEAVE_START: Seconds = 0.9;
    pub const DEFAULT_STEP_TIMEOUT: Seconds = 6.0;
    pub const DEFAULT_PREPULL_GRACE: Seconds = 1.5;

    pub fn new() -> Self {
        Self {
            weave: WeaveThresholds::default(),
            opener: OpenerTolerances::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for WeaveThresholds {
    fn default() -> Self {
        Self {
            min_weave: EngineConfig::DEFAULT_MIN_WEAVE,
            late_weave_start: EngineConfig::DEFAULT_LATE_WEAVE_START,
        }
    }
}

impl Default for OpenerTolerances {
    fn default() -> Self {
        Self {
            step_timeout: EngineConfig::DEFAULT_STEP_TIMEOUT,
            prepull_grace: EngineConfig::DEFAULT_PREPULL_GRACE,
        }
    }
}
