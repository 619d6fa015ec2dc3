//! Groups file persistence.
//!
//! The whole collection is one JSON blob. Loads degrade to an empty collection
//! (with `load_error` set) so the tool stays usable; saves propagate failures.

use std::fs;
use std::path::{Path, PathBuf};

use super::errors::GroupError;
use super::types::GroupsData;

/// Environment variable overriding the groups file location.
pub const GROUPS_FILE_ENV_VAR: &str = "CASEMENT_GROUPS_FILE";

/// Load groups from `path`.
///
/// Returns default empty state if the file doesn't exist, or if it is
/// unreadable or corrupted (with the error logged and recorded in `load_error`).
pub fn load_groups(path: &Path) -> GroupsData {
    if !path.exists() {
        return GroupsData::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(e) => {
                // ERROR (not warn): file exists but is corrupted, user action required.
                tracing::error!(
                    event = "core.groups.json_parse_failed",
                    path = %path.display(),
                    error = %e,
                    "Groups file exists but contains invalid JSON"
                );
                GroupsData {
                    load_error: Some(format!(
                        "Groups file corrupted ({}). Your groups could not be loaded. \
                         Delete {} to reset.",
                        e,
                        path.display()
                    )),
                    ..Default::default()
                }
            }
        },
        Err(e) => {
            tracing::error!(
                event = "core.groups.load_failed",
                path = %path.display(),
                error = %e
            );
            GroupsData {
                load_error: Some(format!(
                    "Failed to read groups file: {}. Check permissions on {}",
                    e,
                    path.display()
                )),
                ..Default::default()
            }
        }
    }
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        tracing::warn!(
            event = "core.groups.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err
        );
    }
}

/// Save groups to `path`, replacing the file atomically.
pub fn save_groups(path: &Path, data: &GroupsData) -> Result<(), GroupError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GroupError::SaveFailed {
            message: format!("Failed to create directory ({}): {}", parent.display(), e),
        })?;
    }

    let json = serde_json::to_string_pretty(data).map_err(|e| GroupError::SaveFailed {
        message: format!("Failed to serialize groups: {}", e),
    })?;

    let temp_file = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_file, json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(GroupError::SaveFailed {
            message: format!("Failed to write groups file ({}): {}", temp_file.display(), e),
        });
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(GroupError::SaveFailed {
            message: format!("Failed to replace groups file ({}): {}", path.display(), e),
        });
    }

    tracing::info!(
        event = "core.groups.saved",
        path = %path.display(),
        count = data.groups.len()
    );

    Ok(())
}

/// Resolve the groups file path.
///
/// Order: `CASEMENT_GROUPS_FILE`, then the configured path, then
/// `~/.casement/groups.json`.
pub fn groups_file_path(configured: Option<&Path>) -> PathBuf {
    if let Ok(path_str) = std::env::var(GROUPS_FILE_ENV_VAR)
        && !path_str.is_empty()
    {
        return PathBuf::from(path_str);
    }

    match configured {
        Some(path) => path.to_path_buf(),
        None => crate::config::defaults::default_groups_file(),
    }
}

/// Test utilities for groups persistence.
///
/// Public so the CLI crate can use the env lock/guard in its tests.
#[doc(hidden)]
pub mod test_helpers {
    use std::sync::Mutex;

    /// Mutex to serialize tests that modify CASEMENT_GROUPS_FILE.
    pub static GROUPS_FILE_ENV_LOCK: Mutex<()> = Mutex::new(());

    /// RAII guard that removes CASEMENT_GROUPS_FILE on drop.
    pub struct GroupsFileEnvGuard;

    impl GroupsFileEnvGuard {
        pub fn new(path: &std::path::Path) -> Self {
            // SAFETY: Caller must hold GROUPS_FILE_ENV_LOCK to serialize access
            // from Rust test code. Acceptable in test-only code.
            unsafe { std::env::set_var(super::GROUPS_FILE_ENV_VAR, path) };
            Self
        }
    }

    impl Drop for GroupsFileEnvGuard {
        fn drop(&mut self) {
            // SAFETY: Caller must hold GROUPS_FILE_ENV_LOCK throughout guard lifetime.
            unsafe { std::env::remove_var(super::GROUPS_FILE_ENV_VAR) };
        }
    }
}
