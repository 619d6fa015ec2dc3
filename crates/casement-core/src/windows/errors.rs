use crate::errors::CasementError;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Window control is only supported on macOS")]
    PlatformNotSupported,

    #[error("AppleScript execution failed: {message}")]
    ScriptExecution { message: String },

    #[error("AppleScript failed with error: {stderr}")]
    ScriptFailed { stderr: String },

    #[error("Unexpected window server output for {operation}: '{output}'")]
    UnexpectedOutput { operation: String, output: String },
}

impl WindowError {
    /// Hint appended to user-facing messages for common System Events failures.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            WindowError::ScriptFailed { stderr }
                if stderr.contains("not allowed") || stderr.contains("assistive access") =>
            {
                Some("check System Settings > Privacy & Security > Accessibility and Automation")
            }
            WindowError::ScriptFailed { stderr } if stderr.contains("-1712") => {
                Some("System Events timed out; an application may be unresponsive")
            }
            _ => None,
        }
    }
}

impl CasementError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::PlatformNotSupported => "WINDOW_PLATFORM_NOT_SUPPORTED",
            WindowError::ScriptExecution { .. } => "APPLESCRIPT_EXECUTION_FAILED",
            WindowError::ScriptFailed { .. } => "APPLESCRIPT_FAILED",
            WindowError::UnexpectedOutput { .. } => "WINDOW_UNEXPECTED_OUTPUT",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            WindowError::PlatformNotSupported | WindowError::ScriptFailed { .. }
        )
    }
}
