//! Configuration validation logic.

use crate::config::types::CasementConfig;
use crate::errors::ConfigError;

/// Validate a CasementConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - `switch.host_app`, if set, must not be blank
/// - every entry of `switch.protected_apps` must not be blank
/// - `storage.groups_file`, if set, must not be a bare directory path
pub fn validate_config(config: &CasementConfig) -> Result<(), ConfigError> {
    if let Some(ref host) = config.switch.host_app
        && host.trim().is_empty()
    {
        return Err(ConfigError::EmptyAppName {
            field: "host_app".to_string(),
        });
    }

    if config
        .switch
        .protected_apps
        .iter()
        .any(|app| app.trim().is_empty())
    {
        return Err(ConfigError::EmptyAppName {
            field: "protected_apps".to_string(),
        });
    }

    if let Some(ref path) = config.storage.groups_file
        && (path.as_os_str().is_empty() || path.is_dir())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "storage.groups_file must name a file, got '{}'",
                path.display()
            ),
        });
    }

    Ok(())
}
