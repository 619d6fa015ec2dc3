use casement_core::Group;

pub struct GroupTable {
    index_width: usize,
    name_width: usize,
    windows_width: usize,
    apps_width: usize,
    updated_width: usize,
}

impl GroupTable {
    pub fn new(groups: &[Group]) -> Self {
        let name_width = groups
            .iter()
            .map(|g| g.name.chars().count())
            .max()
            .unwrap_or(16)
            .clamp(4, 40); // Between "Name" header min and reasonable terminal width max

        Self {
            index_width: groups.len().to_string().len().max(1),
            name_width,
            windows_width: 7,
            apps_width: 36,
            updated_width: 16,
        }
    }

    pub fn print_table(&self, groups: &[Group]) {
        self.print_header();
        for (i, group) in groups.iter().enumerate() {
            self.print_row(i + 1, group);
        }
        self.print_footer();
    }

    fn print_header(&self) {
        println!("{}", self.border('┌', '┬', '┐'));
        println!("{}", self.header_row());
        println!("{}", self.border('├', '┼', '┤'));
    }

    fn print_footer(&self) {
        println!("{}", self.border('└', '┴', '┘'));
    }

    fn print_row(&self, number: usize, group: &Group) {
        let apps = group.application_names().join(", ");
        let updated = group.updated_at.format("%Y-%m-%d %H:%M").to_string();

        println!(
            "│ {:>width_index$} │ {} │ {:<width_windows$} │ {} │ {} │",
            number,
            truncate(&group.name, self.name_width),
            group.windows.len(),
            truncate(&apps, self.apps_width),
            truncate(&updated, self.updated_width),
            width_index = self.index_width,
            width_windows = self.windows_width,
        );
    }

    fn header_row(&self) -> String {
        format!(
            "│ {:>width_index$} │ {:<width_name$} │ {:<width_windows$} │ {:<width_apps$} │ {:<width_updated$} │",
            "#",
            "Name",
            "Windows",
            "Applications",
            "Updated",
            width_index = self.index_width,
            width_name = self.name_width,
            width_windows = self.windows_width,
            width_apps = self.apps_width,
            width_updated = self.updated_width,
        )
    }

    fn border(&self, left: char, mid: char, right: char) -> String {
        let columns = [
            self.index_width,
            self.name_width,
            self.windows_width,
            self.apps_width,
            self.updated_width,
        ];
        let segments: Vec<String> = columns.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(&mid.to_string()), right)
    }
}

/// Truncate a string to a maximum display width, adding "..." if truncated.
///
/// Uses character count (not byte count) so window titles with emoji or
/// other multi-byte characters are cut at character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_len)
    }
}
