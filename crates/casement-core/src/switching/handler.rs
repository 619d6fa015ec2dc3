use tracing::{debug, error, info, warn};

use crate::groups::types::Group;
use crate::switching::{errors::SwitchError, types::SwitchResult};
use crate::windows::matcher::group_keys;
use crate::windows::traits::WindowServer;
use crate::windows::types::{RaiseOutcome, WindowReference};

/// Show `group` and hide everything else.
///
/// Runs three strictly ordered phases: minimize every visible window outside
/// the group, make the group's running applications visible, then unminimize
/// and raise each group window in list order. The last window raised ends up
/// frontmost.
///
/// # Errors
/// Listing faults in the first phase and any fault in the second phase abort
/// the switch. Per-window faults never do: a failed minimize is counted, a
/// failed restore is reported as not found.
pub fn switch_to(server: &dyn WindowServer, group: &Group) -> Result<SwitchResult, SwitchError> {
    info!(
        event = "core.switch.started",
        group_id = %group.id,
        name = %group.name,
        window_count = group.windows.len()
    );

    let mut result = SwitchResult::default();

    minimize_outside(server, group, &mut result)?;
    make_applications_visible(server, group)?;

    for reference in &group.windows {
        if restore_window(server, reference) {
            result.shown += 1;
        } else {
            result.not_found.push(reference.clone());
        }
    }

    info!(
        event = "core.switch.completed",
        group_id = %group.id,
        shown = result.shown,
        not_found = result.not_found.len(),
        minimized = result.minimized,
        minimize_failures = result.minimize_failures
    );

    Ok(result)
}

fn minimize_outside(
    server: &dyn WindowServer,
    group: &Group,
    result: &mut SwitchResult,
) -> Result<(), SwitchError> {
    let keys = group_keys(&group.windows);

    let visible = server.list_visible_windows().map_err(|source| {
        error!(event = "core.switch.minimize_phase_failed", error = %source);
        SwitchError::MinimizePhase { source }
    })?;

    for window in visible.iter().filter(|w| !keys.contains(&w.match_key())) {
        match server.minimize_window(&window.application_name, &window.window_title) {
            Ok(true) => result.minimized += 1,
            Ok(false) => debug!(
                event = "core.switch.minimize_window_gone",
                application = %window.application_name,
                title = %window.window_title
            ),
            Err(e) => {
                warn!(
                    event = "core.switch.minimize_window_failed",
                    application = %window.application_name,
                    title = %window.window_title,
                    error = %e
                );
                result.minimize_failures += 1;
            }
        }
    }

    info!(
        event = "core.switch.minimize_phase_completed",
        visible = visible.len(),
        minimized = result.minimized
    );
    Ok(())
}

fn make_applications_visible(server: &dyn WindowServer, group: &Group) -> Result<(), SwitchError> {
    for app in group.application_names() {
        let running = server
            .is_application_running(app)
            .and_then(|running| {
                if running {
                    server.set_application_visible(app)?;
                }
                Ok(running)
            })
            .map_err(|source| {
                error!(
                    event = "core.switch.visibility_phase_failed",
                    application = %app,
                    error = %source
                );
                SwitchError::VisibilityPhase { source }
            })?;

        if !running {
            info!(event = "core.switch.app_not_running", application = %app);
        }
    }
    Ok(())
}

/// Bring one group window forward. Returns false when it could not be shown.
fn restore_window(server: &dyn WindowServer, reference: &WindowReference) -> bool {
    let app = reference.application_name.as_str();
    let title = reference.window_title.as_str();

    let outcome = server.is_application_running(app).and_then(|running| {
        if !running {
            return Ok(RaiseOutcome::NotFound);
        }
        server.activate_application(app)?;
        server.unminimize_and_raise(app, title)
    });

    match outcome {
        Ok(RaiseOutcome::Found) => true,
        Ok(RaiseOutcome::NotFound) => {
            info!(event = "core.switch.window_not_found", application = %app, title = %title);
            false
        }
        Err(e) => {
            warn!(
                event = "core.switch.window_restore_failed",
                application = %app,
                title = %title,
                error = %e
            );
            false
        }
    }
}

/// Make every application visible and unminimize all of its windows.
///
/// Used to undo a switch or a [`minimize_all`]. The host application is
/// excluded by the server and never touched.
pub fn restore_all(server: &dyn WindowServer) -> Result<(), SwitchError> {
    info!(event = "core.restore.started");

    let restore = || -> Result<usize, crate::windows::errors::WindowError> {
        let apps = server.list_applications()?;
        for app in &apps {
            server.set_application_visible(app)?;
            server.unminimize_all_windows(app)?;
        }
        Ok(apps.len())
    };

    match restore() {
        Ok(count) => {
            info!(event = "core.restore.completed", application_count = count);
            Ok(())
        }
        Err(source) => {
            error!(event = "core.restore.failed", error = %source);
            Err(SwitchError::RestoreFailed { source })
        }
    }
}

/// Minimize every visible window. Returns how many were minimized.
pub fn minimize_all(server: &dyn WindowServer) -> Result<usize, SwitchError> {
    info!(event = "core.hide.started");

    let visible = server.list_visible_windows().map_err(|source| {
        error!(event = "core.hide.failed", error = %source);
        SwitchError::MinimizePhase { source }
    })?;

    let mut minimized = 0;
    for window in &visible {
        match server.minimize_window(&window.application_name, &window.window_title) {
            Ok(true) => minimized += 1,
            Ok(false) => debug!(
                event = "core.hide.window_gone",
                application = %window.application_name,
                title = %window.window_title
            ),
            Err(e) => warn!(
                event = "core.hide.window_failed",
                application = %window.application_name,
                title = %window.window_title,
                error = %e
            ),
        }
    }

    info!(event = "core.hide.completed", minimized = minimized);
    Ok(minimized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeWindowServer};
    use crate::windows::errors::WindowError;
    use crate::windows::types::LiveWindow;
    use chrono::Utc;

    fn group(name: &str, pairs: &[(&str, &str)]) -> Group {
        let now = Utc::now();
        Group {
            id: format!("{}-id", name.to_lowercase()),
            name: name.to_string(),
            windows: pairs
                .iter()
                .map(|(app, title)| WindowReference::new(app, title, None))
                .collect(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_switch_minimizes_outside_and_raises_group() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_app("Terminal", &["bash"])
            .with_app("Safari", &["Docs"]);
        let dev = group("Dev", &[("Cursor", "main.ts"), ("Terminal", "bash")]);

        let result = switch_to(&server, &dev).unwrap();

        assert_eq!(result.shown, 2);
        assert!(result.not_found.is_empty());
        assert_eq!(result.minimized, 1);
        assert_eq!(server.is_minimized("Safari", "Docs"), Some(true));
        assert_eq!(server.is_minimized("Cursor", "main.ts"), Some(false));
        assert_eq!(server.frontmost().as_deref(), Some("Terminal"));
    }

    #[test]
    fn test_not_running_app_is_reported_without_activation() {
        let server = FakeWindowServer::new().with_app("Cursor", &["main.ts"]);
        let dev = group("Dev", &[("Cursor", "main.ts"), ("Terminal", "bash")]);

        let result = switch_to(&server, &dev).unwrap();

        assert_eq!(result.shown, 1);
        assert_eq!(
            result.not_found,
            vec![WindowReference::new("Terminal", "bash", None)]
        );
        let calls = server.calls();
        assert!(!calls.contains(&Call::Activate("Terminal".to_string())));
        assert!(!calls.contains(&Call::SetVisible("Terminal".to_string())));
    }

    #[test]
    fn test_minimize_failure_is_counted_not_fatal() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_app("Notes", &["todo"])
            .with_app("Mail", &["Inbox"])
            .failing("minimize_window", Some("Notes"));
        let dev = group("Dev", &[("Cursor", "main.ts")]);

        let result = switch_to(&server, &dev).unwrap();

        assert_eq!(result.minimized, 1);
        assert_eq!(result.minimize_failures, 1);
        assert_eq!(result.shown, 1);
    }

    #[test]
    fn test_listing_fault_aborts_before_any_change() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .failing("list_visible_windows", None);
        let dev = group("Dev", &[("Cursor", "main.ts")]);

        let result = switch_to(&server, &dev);

        assert!(matches!(result, Err(SwitchError::MinimizePhase { .. })));
        assert_eq!(server.calls(), vec![Call::ListVisibleWindows]);
    }

    #[test]
    fn test_visibility_fault_aborts_switch() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .failing("set_application_visible", Some("Cursor"));
        let dev = group("Dev", &[("Cursor", "main.ts")]);

        let result = switch_to(&server, &dev);
        assert!(matches!(result, Err(SwitchError::VisibilityPhase { .. })));
    }

    #[test]
    fn test_restore_fault_downgrades_to_not_found() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_app("Terminal", &["bash"])
            .failing("unminimize_and_raise", Some("Cursor"));
        let dev = group("Dev", &[("Cursor", "main.ts"), ("Terminal", "bash")]);

        let result = switch_to(&server, &dev).unwrap();

        assert_eq!(result.shown, 1);
        assert_eq!(result.not_found[0].application_name, "Cursor");
    }

    #[test]
    fn test_hidden_group_app_is_made_visible() {
        let server = FakeWindowServer::new().with_hidden_app("Mail", &["Inbox"]);
        let work = group("Work", &[("Mail", "Inbox")]);

        let result = switch_to(&server, &work).unwrap();

        assert_eq!(result.shown, 1);
        assert!(server.app("Mail").unwrap().visible);
    }

    #[test]
    fn test_minimized_group_window_is_restored() {
        let server = FakeWindowServer::new()
            .with_app("Terminal", &["zsh"])
            .with_minimized_window("Terminal", "bash");
        let dev = group("Dev", &[("Terminal", "bash")]);

        let result = switch_to(&server, &dev).unwrap();

        assert_eq!(result.shown, 1);
        assert_eq!(server.is_minimized("Terminal", "bash"), Some(false));
        assert_eq!(server.is_minimized("Terminal", "zsh"), Some(true));
        assert_eq!(server.front_window("Terminal").as_deref(), Some("bash"));
    }

    #[test]
    fn test_restore_all_unminimizes_everything() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_minimized_window("Cursor", "old.ts")
            .with_hidden_app("Mail", &["Inbox"]);

        restore_all(&server).unwrap();

        assert_eq!(server.minimized_count(), 0);
        assert!(server.app("Mail").unwrap().visible);
    }

    #[test]
    fn test_restore_all_propagates_fault() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .failing("unminimize_all_windows", Some("Cursor"));

        let result = restore_all(&server);
        assert!(matches!(result, Err(SwitchError::RestoreFailed { .. })));
    }

    #[test]
    fn test_minimize_all_skips_host() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts", "lib.rs"])
            .with_app("Ghostty", &["casement"])
            .excluding("Ghostty");

        assert_eq!(minimize_all(&server).unwrap(), 2);
        assert_eq!(server.is_minimized("Ghostty", "casement"), Some(false));
    }

    #[test]
    fn test_switch_minimizes_every_same_titled_window() {
        let server = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_app("Terminal", &["bash", "bash"]);
        let editor = group("Editor", &[("Cursor", "main.ts")]);

        let result = switch_to(&server, &editor).unwrap();

        assert_eq!(result.minimized, 2);
        assert_eq!(result.minimize_failures, 0);
        assert_eq!(
            server.on_screen(),
            vec![("Cursor".to_string(), "main.ts".to_string())]
        );
        let terminal = server.app("Terminal").unwrap();
        assert!(terminal.windows.iter().all(|w| w.minimized));
    }

    /// Quits `app` right after the window listing, as if the user closed it.
    struct QuitsAfterListing<'a> {
        inner: &'a FakeWindowServer,
        app: &'a str,
    }

    impl WindowServer for QuitsAfterListing<'_> {
        fn list_visible_windows(&self) -> Result<Vec<LiveWindow>, WindowError> {
            let windows = self.inner.list_visible_windows()?;
            self.inner.quit(self.app);
            Ok(windows)
        }

        fn list_applications(&self) -> Result<Vec<String>, WindowError> {
            self.inner.list_applications()
        }

        fn minimize_window(&self, app: &str, title: &str) -> Result<bool, WindowError> {
            self.inner.minimize_window(app, title)
        }

        fn unminimize_and_raise(&self, app: &str, title: &str) -> Result<RaiseOutcome, WindowError> {
            self.inner.unminimize_and_raise(app, title)
        }

        fn set_application_visible(&self, app: &str) -> Result<(), WindowError> {
            self.inner.set_application_visible(app)
        }

        fn is_application_running(&self, app: &str) -> Result<bool, WindowError> {
            self.inner.is_application_running(app)
        }

        fn activate_application(&self, app: &str) -> Result<(), WindowError> {
            self.inner.activate_application(app)
        }

        fn unminimize_all_windows(&self, app: &str) -> Result<(), WindowError> {
            self.inner.unminimize_all_windows(app)
        }
    }

    #[test]
    fn test_vanished_window_is_not_counted_as_minimized() {
        let fake = FakeWindowServer::new()
            .with_app("Cursor", &["main.ts"])
            .with_app("Terminal", &["bash", "bash"])
            .with_app("Safari", &["Docs"]);
        let server = QuitsAfterListing {
            inner: &fake,
            app: "Safari",
        };
        let editor = group("Editor", &[("Cursor", "main.ts")]);

        let result = switch_to(&server, &editor).unwrap();

        assert_eq!(result.minimized, 2);
        assert_eq!(result.minimize_failures, 0);
        assert!(
            fake.calls()
                .contains(&Call::Minimize("Safari".to_string(), "Docs".to_string()))
        );
    }

    #[test]
    fn test_minimize_all_counts_same_titled_windows_once_each() {
        let server = FakeWindowServer::new()
            .with_app("Terminal", &["bash", "bash"])
            .with_app("Safari", &["Docs"]);

        assert_eq!(minimize_all(&server).unwrap(), 3);
        assert!(server.on_screen().is_empty());
        assert_eq!(minimize_all(&server).unwrap(), 0);
    }
}
