use crate::errors::CasementError;

#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("Group '{id}' not found")]
    NotFound { id: String },

    #[error("A group named '{name}' already exists")]
    NameCollision { name: String },

    #[error("Group name cannot be empty")]
    EmptyName,

    #[error("Select at least one window for the group")]
    EmptySelection,

    #[error("Window of '{application}' has no title and cannot be saved")]
    EmptyWindowTitle { application: String },

    #[error("Window '{application}: {title}' already belongs to group '{group}'")]
    WindowAlreadyGrouped {
        application: String,
        title: String,
        group: String,
    },

    #[error("Failed to save groups: {message}")]
    SaveFailed { message: String },

    #[error("Groups file corrupted: {message}")]
    LoadCorrupted { message: String },
}

impl CasementError for GroupError {
    fn error_code(&self) -> &'static str {
        match self {
            GroupError::NotFound { .. } => "GROUP_NOT_FOUND",
            GroupError::NameCollision { .. } => "GROUP_NAME_COLLISION",
            GroupError::EmptyName => "GROUP_EMPTY_NAME",
            GroupError::EmptySelection => "GROUP_EMPTY_SELECTION",
            GroupError::EmptyWindowTitle { .. } => "GROUP_EMPTY_WINDOW_TITLE",
            GroupError::WindowAlreadyGrouped { .. } => "GROUP_WINDOW_ALREADY_GROUPED",
            GroupError::SaveFailed { .. } => "GROUP_SAVE_FAILED",
            GroupError::LoadCorrupted { .. } => "GROUP_LOAD_CORRUPTED",
        }
    }

    fn is_user_error(&self) -> bool {
        // Exhaustive match ensures new variants force an explicit classification.
        match self {
            GroupError::NotFound { .. }
            | GroupError::NameCollision { .. }
            | GroupError::EmptyName
            | GroupError::EmptySelection
            | GroupError::EmptyWindowTitle { .. }
            | GroupError::WindowAlreadyGrouped { .. } => true,
            GroupError::SaveFailed { .. } | GroupError::LoadCorrupted { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_collision_display() {
        let error = GroupError::NameCollision {
            name: "work".to_string(),
        };
        assert_eq!(error.to_string(), "A group named 'work' already exists");
        assert_eq!(error.error_code(), "GROUP_NAME_COLLISION");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_window_already_grouped_display() {
        let error = GroupError::WindowAlreadyGrouped {
            application: "Terminal".to_string(),
            title: "bash".to_string(),
            group: "Dev".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Window 'Terminal: bash' already belongs to group 'Dev'"
        );
    }

    #[test]
    fn test_persistence_errors_are_system_errors() {
        let save = GroupError::SaveFailed {
            message: "disk full".to_string(),
        };
        assert!(!save.is_user_error());
        assert_eq!(save.error_code(), "GROUP_SAVE_FAILED");

        let load = GroupError::LoadCorrupted {
            message: "bad json".to_string(),
        };
        assert!(!load.is_user_error());
    }
}
