//! Group repository.
//!
//! Every mutation is a load → pure transform → save cycle over the full
//! collection. The transforms below never touch disk and return a new
//! collection, so a failed save leaves nothing half-applied in memory.
//! Concurrent writers are not coordinated: the last save wins.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::errors::GroupError;
use super::persistence::{load_groups, save_groups};
use super::types::{Group, GroupUpdate, GroupsData};
use super::validation::{validate_name, validate_new_group, validate_windows};
use crate::windows::types::WindowReference;

/// Append a newly validated group. Returns the new collection and the group.
pub fn apply_create(
    groups: &[Group],
    name: &str,
    windows: Vec<WindowReference>,
    id: String,
    now: DateTime<Utc>,
) -> Result<(Vec<Group>, Group), GroupError> {
    let name = validate_new_group(name, &windows, groups)?;
    let group = Group {
        id,
        name,
        windows,
        created_at: now,
        updated_at: now,
    };

    let mut next = groups.to_vec();
    next.push(group.clone());
    Ok((next, group))
}

/// Apply partial fields to the group `id`, refreshing `updated_at`.
pub fn apply_update(
    groups: &[Group],
    id: &str,
    update: GroupUpdate,
    now: DateTime<Utc>,
) -> Result<(Vec<Group>, Group), GroupError> {
    let index = groups
        .iter()
        .position(|g| g.id == id)
        .ok_or_else(|| GroupError::NotFound { id: id.to_string() })?;

    let mut group = groups[index].clone();
    if let Some(name) = update.name {
        group.name = validate_name(&name, groups, Some(id))?;
    }
    if let Some(windows) = update.windows {
        validate_windows(&windows)?;
        group.windows = windows;
    }
    group.updated_at = now;

    let mut next = groups.to_vec();
    next[index] = group.clone();
    Ok((next, group))
}

/// Remove the group `id`. Returns the new collection and whether it existed.
pub fn apply_delete(groups: &[Group], id: &str) -> (Vec<Group>, bool) {
    let next: Vec<Group> = groups.iter().filter(|g| g.id != id).cloned().collect();
    let removed = next.len() != groups.len();
    (next, removed)
}

/// File-backed CRUD over groups.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    path: PathBuf,
}

impl GroupRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every group. Read or parse failures yield an empty collection
    /// with `load_error` set.
    pub fn load_all(&self) -> GroupsData {
        load_groups(&self.path)
    }

    pub fn save_all(&self, data: &GroupsData) -> Result<(), GroupError> {
        save_groups(&self.path, data)
    }

    pub fn get(&self, id: &str) -> Option<Group> {
        self.load_all().find(id).cloned()
    }

    pub fn find_by_name(&self, name: &str) -> Option<Group> {
        self.load_all().find_by_name(name).cloned()
    }

    /// Load for a mutation, refusing to overwrite a file that failed to load.
    fn load_for_write(&self) -> Result<GroupsData, GroupError> {
        let data = self.load_all();
        match data.load_error {
            Some(message) => Err(GroupError::LoadCorrupted { message }),
            None => Ok(data),
        }
    }

    /// Create a group, assigning a fresh id and timestamps.
    pub fn create(&self, name: &str, windows: Vec<WindowReference>) -> Result<Group, GroupError> {
        let data = self.load_for_write()?;
        let id = uuid::Uuid::new_v4().to_string();
        let (groups, group) = apply_create(&data.groups, name, windows, id, Utc::now())?;

        self.save_all(&GroupsData {
            groups,
            load_error: None,
        })?;

        info!(
            event = "core.groups.create_completed",
            group_id = %group.id,
            name = %group.name,
            window_count = group.windows.len()
        );
        Ok(group)
    }

    /// Update name and/or windows of an existing group.
    ///
    /// # Errors
    /// Returns `GroupError::NotFound` if the group no longer exists.
    pub fn update(&self, id: &str, update: GroupUpdate) -> Result<Group, GroupError> {
        let data = self.load_for_write()?;
        let (groups, group) = apply_update(&data.groups, id, update, Utc::now())?;

        self.save_all(&GroupsData {
            groups,
            load_error: None,
        })?;

        info!(event = "core.groups.update_completed", group_id = %id);
        Ok(group)
    }

    /// Delete a group. Deleting an absent id is a no-op.
    pub fn delete(&self, id: &str) -> Result<(), GroupError> {
        let data = self.load_for_write()?;
        let (groups, removed) = apply_delete(&data.groups, id);

        if !removed {
            warn!(event = "core.groups.delete_missing", group_id = %id);
            return Ok(());
        }

        self.save_all(&GroupsData {
            groups,
            load_error: None,
        })?;

        info!(event = "core.groups.delete_completed", group_id = %id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, GroupRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GroupRepository::new(temp_dir.path().join("groups.json"));
        (temp_dir, repo)
    }

    fn windows(pairs: &[(&str, &str)]) -> Vec<WindowReference> {
        pairs
            .iter()
            .map(|(app, title)| WindowReference::new(app, title, None))
            .collect()
    }

    #[test]
    fn test_create_assigns_id_and_timestamps() {
        let (_dir, repo) = repo();
        let group = repo
            .create("Dev", windows(&[("Cursor", "main.ts"), ("Terminal", "bash")]))
            .unwrap();

        assert!(!group.id.is_empty());
        assert_eq!(group.created_at, group.updated_at);
        assert_eq!(repo.load_all().groups, vec![group]);
    }

    #[test]
    fn test_create_rejects_case_insensitive_duplicate() {
        let (_dir, repo) = repo();
        repo.create("Work", windows(&[("Slack", "general")])).unwrap();

        let result = repo.create("work", windows(&[("Mail", "Inbox")]));
        assert!(matches!(result, Err(GroupError::NameCollision { .. })));
        assert_eq!(repo.load_all().groups.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let (_dir, repo) = repo();
        let a = repo.create("A", windows(&[("Notes", "a")])).unwrap();
        let b = repo.create("B", windows(&[("Notes", "b")])).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let (_dir, repo) = repo();
        let group = repo.create("Dev", windows(&[("Cursor", "main.ts")])).unwrap();

        let updated = repo
            .update(
                &group.id,
                GroupUpdate {
                    name: Some("Development".to_string()),
                    windows: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Development");
        assert_eq!(updated.created_at, group.created_at);
        assert!(updated.updated_at >= group.updated_at);
        assert_eq!(repo.get(&group.id).unwrap().name, "Development");
    }

    #[test]
    fn test_update_missing_group_is_hard_failure() {
        let (_dir, repo) = repo();
        let result = repo.update("missing", GroupUpdate::default());
        assert!(matches!(result, Err(GroupError::NotFound { id }) if id == "missing"));
    }

    #[test]
    fn test_update_rename_collision() {
        let (_dir, repo) = repo();
        repo.create("Work", windows(&[("Slack", "general")])).unwrap();
        let home = repo.create("Home", windows(&[("Music", "Library")])).unwrap();

        let result = repo.update(
            &home.id,
            GroupUpdate {
                name: Some("WORK".to_string()),
                windows: None,
            },
        );
        assert!(matches!(result, Err(GroupError::NameCollision { .. })));
    }

    #[test]
    fn test_delete_leaves_other_groups_untouched() {
        let (_dir, repo) = repo();
        let keep = repo.create("Keep", windows(&[("Notes", "a")])).unwrap();
        let drop = repo.create("Drop", windows(&[("Notes", "b")])).unwrap();

        repo.delete(&drop.id).unwrap();

        let remaining = repo.load_all().groups;
        assert_eq!(remaining, vec![keep.clone()]);
        assert_eq!(remaining[0].updated_at, keep.updated_at);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let (_dir, repo) = repo();
        repo.create("Keep", windows(&[("Notes", "a")])).unwrap();
        assert!(repo.delete("nope").is_ok());
        assert_eq!(repo.load_all().groups.len(), 1);
    }

    #[test]
    fn test_mutations_refuse_corrupted_file() {
        let (_dir, repo) = repo();
        std::fs::write(repo.path(), "not json").unwrap();

        let result = repo.create("Dev", windows(&[("Cursor", "main.ts")]));
        assert!(matches!(result, Err(GroupError::LoadCorrupted { .. })));
        assert_eq!(std::fs::read_to_string(repo.path()).unwrap(), "not json");
    }

    #[test]
    fn test_find_by_name() {
        let (_dir, repo) = repo();
        let group = repo.create("Dev", windows(&[("Cursor", "main.ts")])).unwrap();
        assert_eq!(repo.find_by_name("dev").map(|g| g.id), Some(group.id));
        assert!(repo.find_by_name("ops").is_none());
    }

    #[test]
    fn test_apply_transforms_do_not_mutate_input() {
        let now = Utc::now();
        let (groups, _) =
            apply_create(&[], "Dev", windows(&[("Cursor", "main.ts")]), "g1".to_string(), now)
                .unwrap();
        let (after_delete, removed) = apply_delete(&groups, "g1");

        assert!(removed);
        assert!(after_delete.is_empty());
        assert_eq!(groups.len(), 1);
    }
}
