use serde::{Deserialize, Serialize};

use super::matcher::{composite_id, match_key};

/// A persisted description of a window the user wants to remember.
///
/// Identity is the (application name, window title) pair; see
/// [`WindowReference::match_key`]. `composite_id` is a display key only and
/// `bundle_id` is captured but not consulted when matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowReference {
    pub application_name: String,
    pub window_title: String,
    pub composite_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

/// A window observed right now through the window server. Never persisted.
///
/// Windows returned by a listing are, by construction, not minimized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveWindow {
    pub application_name: String,
    pub window_title: String,
    /// Session-local identifier; see [`super::matcher::assign_composite_ids`].
    pub composite_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
}

/// Result of asking the window server to unminimize and raise a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaiseOutcome {
    Found,
    NotFound,
}

impl WindowReference {
    pub fn new(application_name: &str, window_title: &str, bundle_id: Option<String>) -> Self {
        Self {
            application_name: application_name.to_string(),
            window_title: window_title.to_string(),
            composite_id: composite_id(application_name, window_title),
            bundle_id,
        }
    }

    /// Capture a live window, keeping its session composite id.
    pub fn from_live(window: &LiveWindow) -> Self {
        Self {
            application_name: window.application_name.clone(),
            window_title: window.window_title.clone(),
            composite_id: window.composite_id.clone(),
            bundle_id: window.bundle_id.clone(),
        }
    }

    pub fn match_key(&self) -> String {
        match_key(&self.application_name, &self.window_title)
    }
}

impl LiveWindow {
    pub fn new(application_name: &str, window_title: &str, bundle_id: Option<String>) -> Self {
        Self {
            application_name: application_name.to_string(),
            window_title: window_title.to_string(),
            composite_id: composite_id(application_name, window_title),
            bundle_id,
        }
    }

    pub fn match_key(&self) -> String {
        match_key(&self.application_name, &self.window_title)
    }
}

impl std::fmt::Display for WindowReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.application_name, self.window_title)
    }
}

impl std::fmt::Display for LiveWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.application_name, self.window_title)
    }
}
