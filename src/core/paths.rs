//! Centralized path helpers for config and cache directories.

use std::path::PathBuf;

use crate::core::app;

/// Name of the user configuration file inside the config directory.
pub const CONFIG_FILE: &str = "landr.json";

/// Project directories (config, cache) from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Config directory (~/.config/balena-landr/).
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Cache directory (~/.cache/balena-landr/).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// User configuration file (~/.config/balena-landr/landr.json). May not exist.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}
