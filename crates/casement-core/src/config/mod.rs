//! # Configuration System
//!
//! TOML configuration for casement.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.casement/config.toml`
//! 3. **Override file** - `$CASEMENT_CONFIG`
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use casement_core::config::CasementConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CasementConfig::load_hierarchy()?;
//!     let excluded = config.excluded_apps();
//!     println!("never touched: {:?}", excluded);
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

use std::path::PathBuf;

pub use types::{CasementConfig, StorageConfig, SwitchConfig};
pub use validation::validate_config;

impl CasementConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }

    /// Applications every window-server enumeration must skip: the host
    /// application (configured or detected) followed by the protected apps.
    pub fn excluded_apps(&self) -> Vec<String> {
        let mut excluded = Vec::new();
        let host = self
            .switch
            .host_app
            .clone()
            .or_else(crate::windows::host::detect_host_app);
        if let Some(host) = host {
            excluded.push(host);
        }
        for app in &self.switch.protected_apps {
            if !excluded.contains(app) {
                excluded.push(app.clone());
            }
        }
        excluded
    }

    /// Path of the groups file, honouring `CASEMENT_GROUPS_FILE` first.
    pub fn groups_file(&self) -> PathBuf {
        crate::groups::persistence::groups_file_path(self.storage.groups_file.as_deref())
    }
}
