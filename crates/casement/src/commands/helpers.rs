use std::io::{self, Write};

use tracing::{info, warn};

use casement_core::groups::GroupRepository;
use casement_core::switching::{SwitchError, SwitchOutcome, SwitchResult};
use casement_core::{CasementConfig, Group, SystemEventsServer};

/// Load configuration, warning on stderr and falling back to defaults on error.
pub fn load_config_with_warning() -> CasementConfig {
    match CasementConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.casement/config.toml and $CASEMENT_CONFIG for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            CasementConfig::default()
        }
    }
}

/// System Events server that never touches the host or protected apps.
pub fn window_server(config: &CasementConfig) -> SystemEventsServer {
    let excluded = config.excluded_apps();
    info!(event = "cli.window_server_created", excluded = ?excluded);
    SystemEventsServer::new(excluded)
}

pub fn group_repository(config: &CasementConfig) -> GroupRepository {
    GroupRepository::new(config.groups_file())
}

/// Load all groups, telling the user when the file could not be read.
pub fn load_groups_with_warning(repo: &GroupRepository) -> Vec<Group> {
    let data = repo.load_all();
    if let Some(load_error) = &data.load_error {
        eprintln!(
            "⚠️  Could not read {}: {}. Showing no groups.",
            repo.path().display(),
            load_error
        );
    }
    data.groups
}

/// Print `message` and read one line. Returns `None` at end of input.
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

pub fn is_confirmation_accepted(input: &str) -> bool {
    let normalized = input.trim().to_lowercase();
    normalized == "y" || normalized == "yes"
}

/// Parse a 1-based item number in `1..=count`. Returns the 0-based index.
pub fn parse_index(input: &str, count: usize) -> Option<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Some(n - 1),
        _ => None,
    }
}

/// Parse a comma-separated list of 1-based item numbers.
///
/// Returns 0-based indices in input order with duplicates dropped.
pub fn parse_selection(input: &str, count: usize) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let index = parse_index(part, count)
            .ok_or_else(|| format!("'{}' is not a number between 1 and {}", part, count))?;
        if !indices.contains(&index) {
            indices.push(index);
        }
    }
    Ok(indices)
}

/// Print the user-facing summary of a switch.
///
/// A switch that showed nothing is reported as a failure even though no
/// fault occurred.
pub fn print_switch_result(group: &Group, result: &SwitchResult) {
    match result.outcome() {
        SwitchOutcome::Success => {
            println!(
                "✅ Switched to '{}' ({} window(s))",
                group.name, result.shown
            );
        }
        SwitchOutcome::Partial => {
            println!(
                "⚠️  Switched to '{}': {} of {} window(s) shown",
                group.name,
                result.shown,
                result.total()
            );
        }
        SwitchOutcome::Failed => {
            eprintln!(
                "❌ No windows of '{}' could be found. Are its applications running?",
                group.name
            );
        }
    }

    for missing in &result.not_found {
        println!("   Not found: {}", missing);
    }
    if result.minimize_failures > 0 {
        println!(
            "   {} window(s) outside the group could not be minimized",
            result.minimize_failures
        );
    }
}

/// Print a whole-phase window failure with a remediation hint when known.
pub fn print_switch_error(context: &str, error: &SwitchError) {
    eprintln!("❌ {}: {}", context, error);
    if let Some(hint) = error.window_error().hint() {
        eprintln!("   Hint: {}", hint);
    }
}
