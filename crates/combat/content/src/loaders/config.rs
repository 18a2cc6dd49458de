//! Policy and engine configuration loader.

use std::path::Path;

use combat_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};
use crate::policy::PolicyConfig;

/// Loader for TOML configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the user policy (enabled presets and thresholds).
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_policy(path: &Path) -> LoadResult<PolicyConfig> {
        let content = read_file(path)?;
        Self::parse_policy(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse policy TOML {}: {}", path.display(), e))
    }

    pub fn parse_policy(content: &str) -> LoadResult<PolicyConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Load engine tunables (weave thresholds, opener tolerances).
    pub fn load_engine(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse engine TOML: {}", e))?;

        Ok(config)
    }
}
