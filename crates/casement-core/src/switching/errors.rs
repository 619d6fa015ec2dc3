use crate::errors::CasementError;
use crate::windows::errors::WindowError;

/// Whole-phase failures of a switch, restore or minimize-all.
///
/// Per-window faults never surface here; they are downgraded to "not found"
/// (restore phase) or counted (minimize phase).
#[derive(Debug, thiserror::Error)]
pub enum SwitchError {
    #[error("Failed to hide windows outside the group: {source}")]
    MinimizePhase { source: WindowError },

    #[error("Failed to make group applications visible: {source}")]
    VisibilityPhase { source: WindowError },

    #[error("Failed to restore windows: {source}")]
    RestoreFailed { source: WindowError },
}

impl SwitchError {
    pub fn window_error(&self) -> &WindowError {
        match self {
            SwitchError::MinimizePhase { source }
            | SwitchError::VisibilityPhase { source }
            | SwitchError::RestoreFailed { source } => source,
        }
    }
}

impl CasementError for SwitchError {
    fn error_code(&self) -> &'static str {
        match self {
            SwitchError::MinimizePhase { .. } => "SWITCH_MINIMIZE_PHASE_FAILED",
            SwitchError::VisibilityPhase { .. } => "SWITCH_VISIBILITY_PHASE_FAILED",
            SwitchError::RestoreFailed { .. } => "RESTORE_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        self.window_error().is_user_error()
    }
}
