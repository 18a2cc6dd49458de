//! Content loaders for reading policy and replay data from files.
//!
//! Policies and engine tunables are TOML (hand-edited); scenarios are RON
//! (recorded snapshots with nested structs and enums).

pub mod config;
pub mod factory;
pub mod scenario;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use scenario::ScenarioLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
