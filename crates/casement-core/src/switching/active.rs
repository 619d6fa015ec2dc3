use crate::groups::types::Group;

/// Which group the current interactive session last switched to.
///
/// Client-local and never persisted. Callers [`clear`] it whenever they
/// reload groups, so `active_id` only ever names a group from the collection
/// currently on display, or is `None`.
///
/// [`clear`]: ActiveGroup::clear
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveGroup {
    active_id: Option<String>,
}

impl ActiveGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful or partial switch to `group`.
    pub fn mark(&mut self, group: &Group) {
        self.active_id = Some(group.id.clone());
    }

    /// Forget the active group (after "show all windows" or a reload).
    pub fn clear(&mut self) {
        self.active_id = None;
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_active(&self, group: &Group) -> bool {
        self.active_id.as_deref() == Some(group.id.as_str())
    }
}
