use serde::Serialize;

use crate::windows::types::WindowReference;

/// Outcome of one switch. Produced once per call, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchResult {
    /// Group windows unminimized and raised.
    pub shown: usize,
    /// Group windows that could not be located, in group order.
    pub not_found: Vec<WindowReference>,
    /// Windows outside the group minimized in the first phase.
    pub minimized: usize,
    /// Windows outside the group whose minimize call failed.
    pub minimize_failures: usize,
}

/// How the presentation layer should tone a switch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchOutcome {
    /// Every group window was shown.
    Success,
    /// Some group windows were shown, some were not found.
    Partial,
    /// No group window was shown. Not a fault, but reported as a failure.
    Failed,
}

impl SwitchResult {
    pub fn total(&self) -> usize {
        self.shown + self.not_found.len()
    }

    pub fn outcome(&self) -> SwitchOutcome {
        if self.shown == 0 {
            SwitchOutcome::Failed
        } else if self.not_found.is_empty() {
            SwitchOutcome::Success
        } else {
            SwitchOutcome::Partial
        }
    }
}
