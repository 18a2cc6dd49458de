//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use combat_core::EngineConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::policy::PolicyConfig;
use crate::scenario::Scenario;

/// Loads policy, tunables and scenarios from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── policy.toml
/// ├── engine.toml      (optional)
/// └── scenarios/
///     └── pull.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the user policy from `policy.toml`.
    pub fn load_policy(&self) -> LoadResult<PolicyConfig> {
        ConfigLoader::load_policy(&self.data_dir.join("policy.toml"))
    }

    /// Load engine tunables from `engine.toml`, or defaults when absent.
    pub fn load_engine(&self) -> LoadResult<EngineConfig> {
        let path = self.data_dir.join("engine.toml");
        if path.exists() {
            ConfigLoader::load_engine(&path)
        } else {
            Ok(EngineConfig::default())
        }
    }

    /// Load `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }
}
