//! Detection of the application hosting the casement process.
//!
//! The host must never be hidden by a switch, otherwise the tool would
//! minimize the terminal it is running in.

/// Environment variable set by most macOS terminal emulators.
pub const TERM_PROGRAM_VAR: &str = "TERM_PROGRAM";

/// Map a `TERM_PROGRAM` value to the application name System Events reports.
pub fn host_app_from_term_program(term_program: &str) -> Option<String> {
    let app = match term_program {
        "Apple_Terminal" => "Terminal",
        "iTerm.app" => "iTerm2",
        "ghostty" => "Ghostty",
        "WezTerm" => "WezTerm",
        "vscode" => "Code",
        "Hyper" => "Hyper",
        "Tabby" => "Tabby",
        "" => return None,
        other => other,
    };
    Some(app.to_string())
}

/// Detect the host application from the environment.
pub fn detect_host_app() -> Option<String> {
    let term_program = std::env::var(TERM_PROGRAM_VAR).ok()?;
    let host = host_app_from_term_program(term_program.trim());
    tracing::debug!(
        event = "core.windows.host_detected",
        term_program = %term_program,
        host_app = ?host
    );
    host
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_terminals_map_to_app_names() {
        assert_eq!(
            host_app_from_term_program("Apple_Terminal").as_deref(),
            Some("Terminal")
        );
        assert_eq!(
            host_app_from_term_program("iTerm.app").as_deref(),
            Some("iTerm2")
        );
        assert_eq!(
            host_app_from_term_program("ghostty").as_deref(),
            Some("Ghostty")
        );
        assert_eq!(host_app_from_term_program("vscode").as_deref(), Some("Code"));
    }

    #[test]
    fn test_unknown_terminal_passes_through() {
        assert_eq!(
            host_app_from_term_program("Alacritty").as_deref(),
            Some("Alacritty")
        );
    }

    #[test]
    fn test_empty_term_program_is_none() {
        assert_eq!(host_app_from_term_program(""), None);
    }
}
