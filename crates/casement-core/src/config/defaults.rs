//! Default locations for casement configuration and data.

use std::path::PathBuf;

/// Name of the per-user data directory under `$HOME`.
pub const DATA_DIR_NAME: &str = ".casement";

/// Returns the casement data directory (`~/.casement`).
///
/// Falls back to `./.casement` if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(DATA_DIR_NAME),
        None => {
            tracing::error!(
                event = "core.config.home_dir_not_found",
                fallback = ".",
                "Could not determine home directory - using current directory as fallback"
            );
            PathBuf::from(".").join(DATA_DIR_NAME)
        }
    }
}

/// Returns the default user config path (`~/.casement/config.toml`).
pub fn user_config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Returns the default groups file path (`~/.casement/groups.json`).
pub fn default_groups_file() -> PathBuf {
    data_dir().join("groups.json")
}
