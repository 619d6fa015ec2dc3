//! casement-core: Core library for macOS window groups
//!
//! This library provides the business logic for saving named groups of
//! windows and switching between them. It is used by the `casement` CLI.
//!
//! # Main Entry Points
//!
//! - [`groups`] - Create, update, delete and load persisted groups
//! - [`switching`] - Switch to a group, restore everything, hide everything
//! - [`windows`] - Window server abstraction and the System Events backend
//! - [`config`] - Configuration management

pub mod config;
pub mod errors;
pub mod events;
pub mod groups;
pub mod logging;
pub mod switching;
#[doc(hidden)]
pub mod test_support;
pub mod windows;

// Re-export commonly used types at crate root for convenience
pub use config::CasementConfig;
pub use errors::{CasementError, CasementResult, ConfigError};
pub use groups::{Group, GroupError, GroupRepository, GroupUpdate, GroupsData};
pub use switching::{ActiveGroup, SwitchError, SwitchOutcome, SwitchResult};
pub use windows::{
    LiveWindow, RaiseOutcome, SystemEventsServer, WindowError, WindowReference, WindowServer,
};

// Re-export handler modules as the primary API
pub use switching::handler as switch_ops;

// Re-export logging initialization
pub use logging::init_logging;
