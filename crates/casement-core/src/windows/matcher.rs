//! Window identity.
//!
//! A stored reference and a live window are the same window iff their match
//! keys are equal. The key is the application name and window title joined by
//! the ASCII unit separator, compared case-sensitively with no normalisation.
//! Bundle ids are not consulted.

use std::collections::{HashMap, HashSet};

use super::types::{LiveWindow, WindowReference};
use crate::groups::types::Group;

/// Joins application name and title in a match key. Window titles are cleaned
/// of control characters by the window server, so the separator cannot occur in
/// a title.
pub const MATCH_KEY_SEPARATOR: char = '\u{1f}';

pub fn match_key(application_name: &str, window_title: &str) -> String {
    let mut key = String::with_capacity(application_name.len() + window_title.len() + 1);
    key.push_str(application_name);
    key.push(MATCH_KEY_SEPARATOR);
    key.push_str(window_title);
    key
}

/// Display identifier for a window whose title is unique within its app.
pub fn composite_id(application_name: &str, window_title: &str) -> String {
    format!("{}-{}", application_name, window_title)
}

/// Display identifier for a window whose title collides within its app.
fn indexed_composite_id(application_name: &str, index: usize) -> String {
    format!("{}-{}", application_name, index)
}

pub fn matches(reference: &WindowReference, live: &LiveWindow) -> bool {
    reference.application_name == live.application_name
        && reference.window_title == live.window_title
}

/// Match keys of every reference in a group.
pub fn group_keys(windows: &[WindowReference]) -> HashSet<String> {
    windows.iter().map(WindowReference::match_key).collect()
}

/// Match keys claimed by existing groups, mapped to the claiming group's name.
///
/// When two groups claim the same key (possible after a retitle), the first
/// group in storage order wins.
pub fn claimed_keys(groups: &[Group]) -> HashMap<String, String> {
    let mut claimed = HashMap::new();
    for group in groups {
        for window in &group.windows {
            claimed
                .entry(window.match_key())
                .or_insert_with(|| group.name.clone());
        }
    }
    claimed
}

/// Live windows that may be added to a new group: titled and not claimed by
/// any existing group.
pub fn available_windows(snapshot: &[LiveWindow], groups: &[Group]) -> Vec<LiveWindow> {
    let claimed = claimed_keys(groups);
    snapshot
        .iter()
        .filter(|w| !w.window_title.is_empty())
        .filter(|w| !claimed.contains_key(&w.match_key()))
        .cloned()
        .collect()
}

/// Pair every stored reference with its first live counterpart, if any.
pub fn locate<'a>(
    references: &'a [WindowReference],
    snapshot: &'a [LiveWindow],
) -> Vec<(&'a WindowReference, Option<&'a LiveWindow>)> {
    references
        .iter()
        .map(|r| (r, snapshot.iter().find(|w| matches(r, w))))
        .collect()
}

/// Assign session-local composite ids to a fresh snapshot.
///
/// Windows whose (app, title) pair is unique get `"{app}-{title}"`. When
/// several windows of one app share a title, each gets `"{app}-{index}"`
/// where `index` is its position among that app's windows in the snapshot.
pub fn assign_composite_ids(snapshot: &mut [LiveWindow]) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for window in snapshot.iter() {
        *counts.entry(window.match_key()).or_default() += 1;
    }

    let mut per_app_index: HashMap<String, usize> = HashMap::new();
    for window in snapshot.iter_mut() {
        let index = per_app_index
            .entry(window.application_name.clone())
            .or_default();
        window.composite_id = if counts.get(&window.match_key()).copied().unwrap_or(0) > 1 {
            indexed_composite_id(&window.application_name, *index)
        } else {
            composite_id(&window.application_name, &window.window_title)
        };
        *index += 1;
    }
}
