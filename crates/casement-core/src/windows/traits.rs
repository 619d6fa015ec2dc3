//! Window server trait definition.

use super::errors::WindowError;
use super::types::{LiveWindow, RaiseOutcome};

/// The external capability for enumerating, minimizing and raising windows.
///
/// Implementations exclude the tool's own host application (and any other
/// protected application) from every enumeration, so callers never see or
/// touch those windows.
///
/// Every call is blocking and independent; callers issue them strictly in
/// sequence because calls both read and change shared state such as the
/// frontmost application.
pub trait WindowServer: Send + Sync {
    /// Visible, non-minimized windows of every running, non-background
    /// application, in the order the server reports them.
    fn list_visible_windows(&self) -> Result<Vec<LiveWindow>, WindowError>;

    /// Names of every running, non-background application.
    fn list_applications(&self) -> Result<Vec<String>, WindowError>;

    /// Minimize the first non-minimized window of `application_name` titled
    /// `window_title`. Windows already minimized are skipped, so repeated calls
    /// for same-titled windows minimize each of them in turn.
    ///
    /// Returns `false` when no such window remains; that is not an error.
    fn minimize_window(&self, application_name: &str, window_title: &str)
    -> Result<bool, WindowError>;

    /// Locate the first window of `application_name` whose title equals
    /// `window_title`, unminimize it if needed and raise it within its app.
    fn unminimize_and_raise(
        &self,
        application_name: &str,
        window_title: &str,
    ) -> Result<RaiseOutcome, WindowError>;

    /// Bring a hidden application back to visible. Missing apps are ignored.
    fn set_application_visible(&self, application_name: &str) -> Result<(), WindowError>;

    fn is_application_running(&self, application_name: &str) -> Result<bool, WindowError>;

    /// Make `application_name` the frontmost application. Missing apps are ignored.
    fn activate_application(&self, application_name: &str) -> Result<(), WindowError>;

    /// Unminimize every window of `application_name`.
    fn unminimize_all_windows(&self, application_name: &str) -> Result<(), WindowError>;
}
