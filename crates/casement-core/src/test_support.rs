//! In-memory window server for tests.
//!
//! Public (but hidden) so integration tests and the CLI crate can drive the
//! switching handlers without System Events. Models per-app window stacks
//! (front window first), minimized flags, hidden apps, the frontmost app and
//! injectable per-operation faults.

use std::sync::{Mutex, MutexGuard};

use crate::windows::errors::WindowError;
use crate::windows::matcher::assign_composite_ids;
use crate::windows::traits::WindowServer;
use crate::windows::types::{LiveWindow, RaiseOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeWindow {
    pub title: String,
    pub minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeApp {
    pub name: String,
    pub bundle_id: Option<String>,
    /// False when the app is hidden (all its windows off screen).
    pub visible: bool,
    pub background: bool,
    /// Window stack, front window first.
    pub windows: Vec<FakeWindow>,
}

/// A recorded window server call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListVisibleWindows,
    ListApplications,
    Minimize(String, String),
    UnminimizeAndRaise(String, String),
    SetVisible(String),
    IsRunning(String),
    Activate(String),
    UnminimizeAll(String),
}

#[derive(Debug, Default)]
struct State {
    apps: Vec<FakeApp>,
    excluded: Vec<String>,
    frontmost: Option<String>,
    calls: Vec<Call>,
    /// (operation, app) pairs that fail; `None` app fails for every app.
    failures: Vec<(String, Option<String>)>,
}

#[derive(Debug, Default)]
pub struct FakeWindowServer {
    state: Mutex<State>,
}

impl FakeWindowServer {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a running, visible app with the given (non-minimized) windows.
    pub fn with_app(self, name: &str, titles: &[&str]) -> Self {
        self.state().apps.push(FakeApp {
            name: name.to_string(),
            bundle_id: None,
            visible: true,
            background: false,
            windows: titles
                .iter()
                .map(|t| FakeWindow {
                    title: t.to_string(),
                    minimized: false,
                })
                .collect(),
        });
        self
    }

    /// Add a minimized window to an existing app (appended at the back).
    pub fn with_minimized_window(self, app: &str, title: &str) -> Self {
        if let Some(a) = self.state().apps.iter_mut().find(|a| a.name == app) {
            a.windows.push(FakeWindow {
                title: title.to_string(),
                minimized: true,
            });
        }
        self
    }

    pub fn with_hidden_app(self, name: &str, titles: &[&str]) -> Self {
        let server = self.with_app(name, titles);
        if let Some(a) = server.state().apps.iter_mut().find(|a| a.name == name) {
            a.visible = false;
        }
        server
    }

    pub fn with_background_app(self, name: &str) -> Self {
        self.state().apps.push(FakeApp {
            name: name.to_string(),
            bundle_id: None,
            visible: true,
            background: true,
            windows: Vec::new(),
        });
        self
    }

    pub fn with_bundle_id(self, app: &str, bundle_id: &str) -> Self {
        if let Some(a) = self.state().apps.iter_mut().find(|a| a.name == app) {
            a.bundle_id = Some(bundle_id.to_string());
        }
        self
    }

    /// Hide `app` from every enumeration, like the tool's own host.
    pub fn excluding(self, app: &str) -> Self {
        self.state().excluded.push(app.to_string());
        self
    }

    /// Make `operation` fail, for one app or (with `None`) for all.
    pub fn failing(self, operation: &str, app: Option<&str>) -> Self {
        self.state()
            .failures
            .push((operation.to_string(), app.map(str::to_string)));
        self
    }

    pub fn quit(&self, app: &str) {
        self.state().apps.retain(|a| a.name != app);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn app(&self, name: &str) -> Option<FakeApp> {
        self.state().apps.iter().find(|a| a.name == name).cloned()
    }

    pub fn frontmost(&self) -> Option<String> {
        self.state().frontmost.clone()
    }

    pub fn is_minimized(&self, app: &str, title: &str) -> Option<bool> {
        self.app(app)?
            .windows
            .iter()
            .find(|w| w.title == title)
            .map(|w| w.minimized)
    }

    /// Title of the front window of `app`.
    pub fn front_window(&self, app: &str) -> Option<String> {
        self.app(app)?.windows.first().map(|w| w.title.clone())
    }

    /// Every window of every non-excluded app that is on screen.
    pub fn on_screen(&self) -> Vec<(String, String)> {
        let state = self.state();
        state
            .apps
            .iter()
            .filter(|a| a.visible && !state.excluded.contains(&a.name))
            .flat_map(|a| {
                a.windows
                    .iter()
                    .filter(|w| !w.minimized)
                    .map(|w| (a.name.clone(), w.title.clone()))
            })
            .collect()
    }

    /// Count of minimized windows across non-background, non-excluded apps.
    pub fn minimized_count(&self) -> usize {
        let state = self.state();
        state
            .apps
            .iter()
            .filter(|a| !a.background && !state.excluded.contains(&a.name))
            .map(|a| a.windows.iter().filter(|w| w.minimized).count())
            .sum()
    }

    fn record(&self, call: Call, operation: &str, app: Option<&str>) -> Result<(), WindowError> {
        let mut state = self.state();
        state.calls.push(call);
        let fails = state
            .failures
            .iter()
            .any(|(op, target)| op == operation && (target.is_none() || target.as_deref() == app));
        if fails {
            return Err(WindowError::ScriptFailed {
                stderr: format!("injected failure in {}", operation),
            });
        }
        Ok(())
    }
}

impl WindowServer for FakeWindowServer {
    fn list_visible_windows(&self) -> Result<Vec<LiveWindow>, WindowError> {
        self.record(Call::ListVisibleWindows, "list_visible_windows", None)?;
        let state = self.state();
        let mut windows: Vec<LiveWindow> = state
            .apps
            .iter()
            .filter(|a| !a.background && a.visible && !state.excluded.contains(&a.name))
            .flat_map(|a| {
                a.windows
                    .iter()
                    .filter(|w| !w.minimized)
                    .map(|w| LiveWindow::new(&a.name, &w.title, a.bundle_id.clone()))
            })
            .collect();
        assign_composite_ids(&mut windows);
        Ok(windows)
    }

    fn list_applications(&self) -> Result<Vec<String>, WindowError> {
        self.record(Call::ListApplications, "list_applications", None)?;
        let state = self.state();
        Ok(state
            .apps
            .iter()
            .filter(|a| !a.background && !state.excluded.contains(&a.name))
            .map(|a| a.name.clone())
            .collect())
    }

    fn minimize_window(
        &self,
        application_name: &str,
        window_title: &str,
    ) -> Result<bool, WindowError> {
        self.record(
            Call::Minimize(application_name.to_string(), window_title.to_string()),
            "minimize_window",
            Some(application_name),
        )?;
        let mut state = self.state();
        let window = state
            .apps
            .iter_mut()
            .find(|a| a.name == application_name)
            .and_then(|a| {
                a.windows
                    .iter_mut()
                    .find(|w| !w.minimized && w.title == window_title)
            });
        match window {
            Some(window) => {
                window.minimized = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn unminimize_and_raise(
        &self,
        application_name: &str,
        window_title: &str,
    ) -> Result<RaiseOutcome, WindowError> {
        self.record(
            Call::UnminimizeAndRaise(application_name.to_string(), window_title.to_string()),
            "unminimize_and_raise",
            Some(application_name),
        )?;
        let mut state = self.state();
        let Some(app) = state.apps.iter_mut().find(|a| a.name == application_name) else {
            return Ok(RaiseOutcome::NotFound);
        };
        let Some(index) = app.windows.iter().position(|w| w.title == window_title) else {
            return Ok(RaiseOutcome::NotFound);
        };
        let mut window = app.windows.remove(index);
        window.minimized = false;
        app.windows.insert(0, window);
        Ok(RaiseOutcome::Found)
    }

    fn set_application_visible(&self, application_name: &str) -> Result<(), WindowError> {
        self.record(
            Call::SetVisible(application_name.to_string()),
            "set_application_visible",
            Some(application_name),
        )?;
        if let Some(app) = self
            .state()
            .apps
            .iter_mut()
            .find(|a| a.name == application_name)
        {
            app.visible = true;
        }
        Ok(())
    }

    fn is_application_running(&self, application_name: &str) -> Result<bool, WindowError> {
        self.record(
            Call::IsRunning(application_name.to_string()),
            "is_application_running",
            Some(application_name),
        )?;
        Ok(self.state().apps.iter().any(|a| a.name == application_name))
    }

    fn activate_application(&self, application_name: &str) -> Result<(), WindowError> {
        self.record(
            Call::Activate(application_name.to_string()),
            "activate_application",
            Some(application_name),
        )?;
        let mut state = self.state();
        if let Some(app) = state.apps.iter_mut().find(|a| a.name == application_name) {
            app.visible = true;
            state.frontmost = Some(application_name.to_string());
        }
        Ok(())
    }

    fn unminimize_all_windows(&self, application_name: &str) -> Result<(), WindowError> {
        self.record(
            Call::UnminimizeAll(application_name.to_string()),
            "unminimize_all_windows",
            Some(application_name),
        )?;
        if let Some(app) = self
            .state()
            .apps
            .iter_mut()
            .find(|a| a.name == application_name)
        {
            for window in &mut app.windows {
                window.minimized = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_skips_minimized_hidden_background_and_excluded() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_minimized_window("Cursor", "old.ts")
            .with_hidden_app("Mail", &["Inbox"])
            .with_background_app("Dock")
            .with_app("Ghostty", &["casement"])
            .excluding("Ghostty");

        let windows = server.list_visible_windows().unwrap();
        assert_eq!(windows, vec![LiveWindow::new("Cursor", "main.ts", None)]);
        assert_eq!(server.list_applications().unwrap(), vec!["Cursor", "Mail"]);
    }

    #[test]
    fn test_raise_moves_window_to_front() {
        let server = FakeWindowServer::new().with_app("Terminal", &["zsh", "bash"]);
        assert_eq!(
            server.unminimize_and_raise("Terminal", "bash").unwrap(),
            RaiseOutcome::Found
        );
        assert_eq!(server.front_window("Terminal").as_deref(), Some("bash"));
    }

    #[test]
    fn test_injected_failure_targets_one_app() {
        let server = FakeWindowServer::new()
            .with_app("Notes", &["a"])
            .with_app("Mail", &["b"])
            .failing("minimize_window", Some("Notes"));

        assert!(server.minimize_window("Notes", "a").is_err());
        assert!(server.minimize_window("Mail", "b").unwrap());
        assert_eq!(server.is_minimized("Mail", "b"), Some(true));
    }

    #[test]
    fn test_minimize_skips_already_minimized_same_title() {
        let server = FakeWindowServer::new().with_app("Terminal", &["bash", "bash"]);

        assert!(server.minimize_window("Terminal", "bash").unwrap());
        assert!(server.minimize_window("Terminal", "bash").unwrap());
        assert!(!server.minimize_window("Terminal", "bash").unwrap());
        assert!(server.on_screen().is_empty());
    }
}
