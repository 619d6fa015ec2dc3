//! Group assembly validation.
//!
//! These checks run when a group is created (and, for names, when it is
//! renamed). They are not re-validated afterwards: a window that is retitled
//! after capture can end up claimed by two groups.

use super::errors::GroupError;
use super::types::Group;
use crate::windows::matcher::claimed_keys;
use crate::windows::types::WindowReference;

/// Validate a group name against existing groups, ignoring `except_id`.
///
/// Returns the trimmed name to store.
pub fn validate_name(name: &str, existing: &[Group], except_id: Option<&str>) -> Result<String, GroupError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(GroupError::EmptyName);
    }

    let collides = existing
        .iter()
        .filter(|g| Some(g.id.as_str()) != except_id)
        .any(|g| g.has_name(trimmed));
    if collides {
        return Err(GroupError::NameCollision {
            name: trimmed.to_string(),
        });
    }

    Ok(trimmed.to_string())
}

/// Every window must carry an application name and a title.
pub fn validate_windows(windows: &[WindowReference]) -> Result<(), GroupError> {
    for window in windows {
        if window.window_title.is_empty() || window.application_name.is_empty() {
            return Err(GroupError::EmptyWindowTitle {
                application: window.application_name.clone(),
            });
        }
    }
    Ok(())
}

/// Validate a new group before it is stored.
///
/// # Rules
///
/// - the trimmed name is non-empty and unique case-insensitively
/// - at least one window is selected
/// - every window has a title
/// - no window is already claimed by an existing group
pub fn validate_new_group(
    name: &str,
    windows: &[WindowReference],
    existing: &[Group],
) -> Result<String, GroupError> {
    let name = validate_name(name, existing, None)?;

    if windows.is_empty() {
        return Err(GroupError::EmptySelection);
    }
    validate_windows(windows)?;

    let claimed = claimed_keys(existing);
    if let Some((window, group)) = windows
        .iter()
        .find_map(|w| claimed.get(&w.match_key()).map(|g| (w, g)))
    {
        return Err(GroupError::WindowAlreadyGrouped {
            application: window.application_name.clone(),
            title: window.window_title.clone(),
            group: group.clone(),
        });
    }

    Ok(name)
}
