//! Configuration type definitions for casement.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [switch]
//! host_app = "Ghostty"
//! protected_apps = ["Raycast", "1Password"]
//!
//! [storage]
//! groups_file = "/Users/me/Dropbox/casement/groups.json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration loaded from TOML config files.
///
/// Loaded from `~/.casement/config.toml`, then from the file named by
/// `CASEMENT_CONFIG` when that variable is set. Later files override earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CasementConfig {
    /// Switching behavior
    #[serde(default)]
    pub switch: SwitchConfig,

    /// Where group records are stored
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Switching configuration.
///
/// Applications listed here are invisible to every window-server
/// enumeration: they are never minimized by a switch and never touched by
/// restore.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SwitchConfig {
    /// The application hosting casement itself (usually the terminal).
    /// Detected from `TERM_PROGRAM` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_app: Option<String>,

    /// Further applications that are never hidden or restored.
    #[serde(default)]
    pub protected_apps: Vec<String>,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StorageConfig {
    /// Path of the groups JSON file. Default: `~/.casement/groups.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups_file: Option<PathBuf>,
}
