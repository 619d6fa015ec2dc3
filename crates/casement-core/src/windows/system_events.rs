//! macOS window server backed by System Events.
//!
//! Each operation is one `osascript` run. Window titles are compared with
//! `considering case` so AppleScript's default case-insensitive string
//! comparison cannot match a different window than the one listed.

use tracing::{debug, info};

use super::applescript::{parse_app_lines, parse_bool, parse_window_lines, run_script, with_helpers};
use super::errors::WindowError;
use super::matcher::assign_composite_ids;
use super::traits::WindowServer;
use super::types::{LiveWindow, RaiseOutcome};

const LIST_WINDOWS_SCRIPT: &str = r#"
on run argv
	set linesOut to {}
	tell application "System Events"
		repeat with proc in (every process whose background only is false)
			set procName to name of proc
			set bundleId to ""
			try
				set bundleId to bundle identifier of proc
			end try
			if visible of proc then
				try
					repeat with win in (windows of proc)
						set isMinimized to false
						try
							set isMinimized to value of attribute "AXMinimized" of win
						end try
						if isMinimized is not true then
							set winTitle to ""
							try
								set winTitle to name of win
							end try
							set end of linesOut to my cleanText(procName) & tab & my cleanText(winTitle) & tab & my cleanText(bundleId)
						end if
					end repeat
				end try
			end if
		end repeat
	end tell
	set AppleScript's text item delimiters to linefeed
	set outText to linesOut as text
	set AppleScript's text item delimiters to ""
	return outText
end run
"#;

const LIST_APPLICATIONS_SCRIPT: &str = r#"
on run argv
	tell application "System Events"
		set appNames to name of every process whose background only is false
	end tell
	set AppleScript's text item delimiters to linefeed
	set outText to appNames as text
	set AppleScript's text item delimiters to ""
	return outText
end run
"#;

const MINIMIZE_WINDOW_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	set wantedTitle to item 2 of argv
	tell application "System Events"
		if not (exists process appName) then return "not_found"
		tell process appName
			repeat with win in windows
				set alreadyMinimized to false
				try
					set alreadyMinimized to value of attribute "AXMinimized" of win
				end try
				if alreadyMinimized is not true then
					set thisTitle to ""
					try
						set thisTitle to name of win
					end try
					considering case
						set isMatch to ((my cleanText(thisTitle)) is wantedTitle)
					end considering
					if isMatch then
						set value of attribute "AXMinimized" of win to true
						return "minimized"
					end if
				end if
			end repeat
		end tell
	end tell
	return "not_found"
end run
"#;

const UNMINIMIZE_AND_RAISE_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	set wantedTitle to item 2 of argv
	tell application "System Events"
		if not (exists process appName) then return "not_found"
		tell process appName
			repeat with win in windows
				set thisTitle to ""
				try
					set thisTitle to name of win
				end try
				considering case
					set isMatch to ((my cleanText(thisTitle)) is wantedTitle)
				end considering
				if isMatch then
					try
						if value of attribute "AXMinimized" of win is true then
							set value of attribute "AXMinimized" of win to false
						end if
					end try
					perform action "AXRaise" of win
					return "found"
				end if
			end repeat
		end tell
	end tell
	return "not_found"
end run
"#;

const SET_VISIBLE_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	tell application "System Events"
		if exists process appName then set visible of process appName to true
	end tell
	return "ok"
end run
"#;

const ACTIVATE_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	tell application "System Events"
		if exists process appName then set frontmost of process appName to true
	end tell
	return "ok"
end run
"#;

const IS_RUNNING_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	tell application "System Events"
		if exists process appName then return "true"
	end tell
	return "false"
end run
"#;

const UNMINIMIZE_ALL_SCRIPT: &str = r#"
on run argv
	set appName to item 1 of argv
	tell application "System Events"
		if not (exists process appName) then return "ok"
		tell process appName
			repeat with win in windows
				try
					if value of attribute "AXMinimized" of win is true then
						set value of attribute "AXMinimized" of win to false
					end if
				end try
			end repeat
		end tell
	end tell
	return "ok"
end run
"#;

/// Window server driving System Events through `osascript`.
///
/// Off macOS every call fails with [`WindowError::PlatformNotSupported`].
#[derive(Debug, Clone, Default)]
pub struct SystemEventsServer {
    excluded_apps: Vec<String>,
}

impl SystemEventsServer {
    /// Create a server that hides `excluded_apps` from every enumeration.
    pub fn new(excluded_apps: Vec<String>) -> Self {
        Self { excluded_apps }
    }

    pub fn excluded_apps(&self) -> &[String] {
        &self.excluded_apps
    }

    fn is_excluded(&self, application_name: &str) -> bool {
        self.excluded_apps.iter().any(|a| a == application_name)
    }
}

fn expect_ok(output: &str, operation: &str) -> Result<(), WindowError> {
    match output.trim() {
        "ok" | "not_found" => Ok(()),
        other => Err(WindowError::UnexpectedOutput {
            operation: operation.to_string(),
            output: other.to_string(),
        }),
    }
}

fn parse_minimize_output(output: &str) -> Result<bool, WindowError> {
    match output.trim() {
        "minimized" => Ok(true),
        "not_found" => Ok(false),
        other => Err(WindowError::UnexpectedOutput {
            operation: "minimize_window".to_string(),
            output: other.to_string(),
        }),
    }
}

impl WindowServer for SystemEventsServer {
    fn list_visible_windows(&self) -> Result<Vec<LiveWindow>, WindowError> {
        let output = run_script(&with_helpers(LIST_WINDOWS_SCRIPT), "list_visible_windows", &[])?;

        let mut windows: Vec<LiveWindow> = parse_window_lines(&output)
            .into_iter()
            .filter(|w| !self.is_excluded(&w.application_name))
            .collect();
        assign_composite_ids(&mut windows);

        info!(
            event = "core.windows.list_completed",
            count = windows.len(),
            excluded = ?self.excluded_apps
        );
        Ok(windows)
    }

    fn list_applications(&self) -> Result<Vec<String>, WindowError> {
        let output = run_script(LIST_APPLICATIONS_SCRIPT, "list_applications", &[])?;
        let apps: Vec<String> = parse_app_lines(&output)
            .into_iter()
            .filter(|a| !self.is_excluded(a))
            .collect();

        debug!(event = "core.windows.list_applications_completed", count = apps.len());
        Ok(apps)
    }

    fn minimize_window(
        &self,
        application_name: &str,
        window_title: &str,
    ) -> Result<bool, WindowError> {
        let output = run_script(
            &with_helpers(MINIMIZE_WINDOW_SCRIPT),
            "minimize_window",
            &[application_name, window_title],
        )?;
        parse_minimize_output(&output)
    }

    fn unminimize_and_raise(
        &self,
        application_name: &str,
        window_title: &str,
    ) -> Result<RaiseOutcome, WindowError> {
        let output = run_script(
            &with_helpers(UNMINIMIZE_AND_RAISE_SCRIPT),
            "unminimize_and_raise",
            &[application_name, window_title],
        )?;
        match output.trim() {
            "found" => Ok(RaiseOutcome::Found),
            "not_found" => Ok(RaiseOutcome::NotFound),
            other => Err(WindowError::UnexpectedOutput {
                operation: "unminimize_and_raise".to_string(),
                output: other.to_string(),
            }),
        }
    }

    fn set_application_visible(&self, application_name: &str) -> Result<(), WindowError> {
        let output = run_script(
            SET_VISIBLE_SCRIPT,
            "set_application_visible",
            &[application_name],
        )?;
        expect_ok(&output, "set_application_visible")
    }

    fn is_application_running(&self, application_name: &str) -> Result<bool, WindowError> {
        let output = run_script(
            IS_RUNNING_SCRIPT,
            "is_application_running",
            &[application_name],
        )?;
        parse_bool(&output, "is_application_running")
    }

    fn activate_application(&self, application_name: &str) -> Result<(), WindowError> {
        let output = run_script(ACTIVATE_SCRIPT, "activate_application", &[application_name])?;
        expect_ok(&output, "activate_application")
    }

    fn unminimize_all_windows(&self, application_name: &str) -> Result<(), WindowError> {
        let output = run_script(
            UNMINIMIZE_ALL_SCRIPT,
            "unminimize_all_windows",
            &[application_name],
        )?;
        expect_ok(&output, "unminimize_all_windows")
    }
}
