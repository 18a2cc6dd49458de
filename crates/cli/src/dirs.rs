//! Platform-specific directory lookup.

use std::path::PathBuf;

/// Default data directory when neither `--data-dir` nor `ROTATION_DATA_DIR`
/// is given.
///
/// - macOS: `~/Library/Application Support/rotation`
/// - Linux: `~/.config/rotation` (or `$XDG_CONFIG_HOME/rotation`)
/// - Windows: `%APPDATA%\rotation\config`
/// - Fallback: `./data`
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "rotation")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./data"))
}
