use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::windows::types::WindowReference;

/// A named, ordered collection of window references.
///
/// `name` is unique case-insensitively across all groups. `windows` keeps the
/// order the user selected them in; switching does not depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub windows: Vec<WindowReference>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The stored groups blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsData {
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Set when the file exists but could not be read or parsed. Never stored.
    #[serde(skip)]
    pub load_error: Option<String>,
}

/// Partial fields for [`super::repository::GroupRepository::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub windows: Option<Vec<WindowReference>>,
}

impl Group {
    /// Distinct application names in first-occurrence order.
    pub fn application_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for window in &self.windows {
            if !names.contains(&window.application_name.as_str()) {
                names.push(&window.application_name);
            }
        }
        names
    }

    /// Case-insensitive name comparison used for uniqueness checks and lookup.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl GroupsData {
    pub fn find(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.has_name(name))
    }
}
