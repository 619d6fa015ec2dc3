//! AppleScript execution and output parsing for the System Events window server.
//!
//! Scripts receive their inputs through `argv` rather than string
//! interpolation, so application names and window titles never need escaping.

use tracing::debug;

use super::errors::WindowError;
use super::types::LiveWindow;

/// Text cleaning handler shared by every script. Tabs, line breaks and the
/// match key separator are replaced with spaces so output lines stay
/// parseable and titles compare the same way they were listed.
const HELPERS: &str = r#"
on cleanText(t)
	if t is missing value then return ""
	set t to t as text
	set AppleScript's text item delimiters to {tab, linefeed, return, (character id 31)}
	set parts to text items of t
	set AppleScript's text item delimiters to " "
	set t to parts as text
	set AppleScript's text item delimiters to ""
	return t
end cleanText
"#;

/// Prefix a script body with the shared handlers.
pub fn with_helpers(body: &str) -> String {
    format!("{}\n{}", HELPERS, body)
}

/// Run an AppleScript with positional arguments and return trimmed stdout.
///
/// The script is fed on stdin (`osascript -`) so that arguments beginning with
/// a dash, such as a `-zsh` window title, are never parsed as options.
#[cfg(target_os = "macos")]
pub fn run_script(script: &str, operation: &str, args: &[&str]) -> Result<String, WindowError> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    debug!(
        event = "core.windows.applescript_executing",
        operation = operation,
        args = ?args
    );

    let mut child = Command::new("osascript")
        .arg("-")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| WindowError::ScriptExecution {
            message: format!("Failed to execute osascript for {}: {}", operation, e),
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(script.as_bytes())
            .map_err(|e| WindowError::ScriptExecution {
                message: format!("Failed to send script for {}: {}", operation, e),
            })?;
    }

    let output = child
        .wait_with_output()
        .map_err(|e| WindowError::ScriptExecution {
            message: format!("Failed to wait for osascript ({}): {}", operation, e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::warn!(
            event = "core.windows.applescript_failed",
            operation = operation,
            stderr = %stderr
        );
        return Err(WindowError::ScriptFailed { stderr });
    }

    let stdout = String::from_utf8_lossy(&output.stdout)
        .trim_end_matches(['\n', '\r'])
        .to_string();

    debug!(
        event = "core.windows.applescript_completed",
        operation = operation,
        output_bytes = stdout.len()
    );

    Ok(stdout)
}

#[cfg(not(target_os = "macos"))]
pub fn run_script(_script: &str, operation: &str, _args: &[&str]) -> Result<String, WindowError> {
    debug!(
        event = "core.windows.applescript_unsupported",
        operation = operation
    );
    Err(WindowError::PlatformNotSupported)
}

/// Parse `app<TAB>title<TAB>bundle` lines into live windows.
///
/// Lines without an application name are skipped. An empty bundle field
/// becomes `None`; an empty title is kept so callers can decide to skip it.
pub fn parse_window_lines(output: &str) -> Vec<LiveWindow> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.splitn(3, '\t');
            let app = fields.next()?.trim();
            if app.is_empty() {
                return None;
            }
            let title = fields.next().unwrap_or("");
            let bundle = fields
                .next()
                .map(str::trim)
                .filter(|b| !b.is_empty() && *b != "missing value")
                .map(str::to_string);
            Some(LiveWindow::new(app, title, bundle))
        })
        .collect()
}

/// Parse one application name per line, skipping blanks.
pub fn parse_app_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Interpret a `true`/`false` script result.
pub fn parse_bool(output: &str, operation: &str) -> Result<bool, WindowError> {
    match output.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(WindowError::UnexpectedOutput {
            operation: operation.to_string(),
            output: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_lines() {
        let output = "Cursor\tmain.ts\tcom.todesktop.cursor\nNotes\tUntitled\t\nFinder\t\tcom.apple.finder";
        let windows = parse_window_lines(output);

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].application_name, "Cursor");
        assert_eq!(windows[0].window_title, "main.ts");
        assert_eq!(windows[0].bundle_id.as_deref(), Some("com.todesktop.cursor"));
        assert_eq!(windows[1].bundle_id, None);
        assert_eq!(windows[2].window_title, "");
    }

    #[test]
    fn test_parse_window_lines_keeps_title_whitespace() {
        let windows = parse_window_lines("Terminal\t -zsh \t");
        assert_eq!(windows[0].window_title, " -zsh ");
    }

    #[test]
    fn test_parse_window_lines_skips_blank_and_appless_lines() {
        let windows = parse_window_lines("\n\tOrphan\t\nSafari\tStart Page\tmissing value\n");
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].application_name, "Safari");
        assert_eq!(windows[0].bundle_id, None);
    }

    #[test]
    fn test_parse_app_lines() {
        assert_eq!(
            parse_app_lines("Finder\n\n Safari \nTerminal"),
            vec!["Finder", "Safari", "Terminal"]
        );
        assert!(parse_app_lines("").is_empty());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true", "is_running").unwrap());
        assert!(!parse_bool("false\n", "is_running").unwrap());
        assert!(matches!(
            parse_bool("yes", "is_running"),
            Err(WindowError::UnexpectedOutput { .. })
        ));
    }

    #[test]
    fn test_with_helpers_prefixes_clean_text() {
        let script = with_helpers("return 1");
        assert!(script.contains("on cleanText(t)"));
        assert!(script.ends_with("return 1"));
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_run_script_unsupported_off_macos() {
        let result = run_script("return 1", "test", &[]);
        assert!(matches!(result, Err(WindowError::PlatformNotSupported)));
    }
}
