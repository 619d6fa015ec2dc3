//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.casement/config.toml`
//! 3. **Override file** - the path named by `CASEMENT_CONFIG`, if set

use crate::config::defaults::user_config_path;
use crate::config::types::{CasementConfig, StorageConfig, SwitchConfig};
use crate::config::validation::validate_config;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an extra config file layered over the user config.
pub const CONFIG_ENV_VAR: &str = "CASEMENT_CONFIG";

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a present file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<CasementConfig, Box<dyn std::error::Error>> {
    let mut config = CasementConfig::default();

    match load_config_file(&user_config_path()) {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with defaults
    }

    if let Some(override_path) = override_config_path() {
        // An explicitly named file must exist.
        let override_config = load_config_file(&override_path)?;
        config = merge_configs(config, override_config);
    }

    validate_config(&config)?;

    Ok(config)
}

fn override_config_path() -> Option<PathBuf> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<CasementConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Box::new(e) as Box<dyn std::error::Error>
        } else {
            format!("Failed to read config file '{}': {}", path.display(), e).into()
        }
    })?;
    let config: CasementConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional values in the override replace base values only if present.
/// Protected application lists are unioned, keeping first-seen order.
pub fn merge_configs(base: CasementConfig, override_config: CasementConfig) -> CasementConfig {
    let mut protected_apps = base.switch.protected_apps;
    for app in override_config.switch.protected_apps {
        if !protected_apps.contains(&app) {
            protected_apps.push(app);
        }
    }

    CasementConfig {
        switch: SwitchConfig {
            host_app: override_config.switch.host_app.or(base.switch.host_app),
            protected_apps,
        },
        storage: StorageConfig {
            groups_file: override_config
                .storage
                .groups_file
                .or(base.storage.groups_file),
        },
    }
}
