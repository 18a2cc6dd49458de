//! Replay scenario loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scenario::Scenario;

/// Loader for RON replay scenarios.
///
/// File format:
/// ```ron
/// (
///     name: "pull",
///     combo: GnbStAdvanced,
///     ticks: [
///         (now: 0.0, player: (job: Gunbreaker, level: 100, hp_percent: 100.0,
///             in_combat: true, in_party: false, base_recast: 2.5),
///          gcd: (remaining: 0.0, total: 2.5)),
///     ],
/// )
/// ```
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        let scenario: Scenario = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON at {:?}: {}", path, e))?;

        for (index, tick) in scenario.ticks.iter().enumerate() {
            tick.validate()
                .map_err(|e| anyhow::anyhow!("Invalid snapshot at tick {}: {}", index, e))?;
        }

        Ok(scenario)
    }
}
