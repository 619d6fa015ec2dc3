use clap::ArgMatches;
use tracing::{error, info};

use casement_core::windows::matcher::available_windows;
use casement_core::{WindowReference, WindowServer, events};

use super::helpers::{
    group_repository, load_config_with_warning, load_groups_with_warning, parse_selection, prompt,
    window_server,
};

pub(crate) fn handle_create_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let server = window_server(&config);
    let repo = group_repository(&config);

    info!(event = "cli.create_started");

    let snapshot = match server.list_visible_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("❌ Failed to list windows: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("   Hint: {}", hint);
            }
            error!(event = "cli.create_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let groups = load_groups_with_warning(&repo);
    let candidates = available_windows(&snapshot, &groups);

    if candidates.is_empty() {
        println!("No ungrouped windows available.");
        info!(event = "cli.create_completed", created = false);
        return Ok(());
    }

    println!("Available windows:");
    for (i, window) in candidates.iter().enumerate() {
        println!("  {:>2}) {}", i + 1, window);
    }

    let Some(input) = prompt("Select windows (comma-separated numbers): ")? else {
        return Ok(());
    };
    let selection = match parse_selection(&input, candidates.len()) {
        Ok(selection) => selection,
        Err(message) => {
            eprintln!("❌ {}", message);
            return Err(message.into());
        }
    };
    let windows: Vec<WindowReference> = selection
        .into_iter()
        .map(|i| WindowReference::from_live(&candidates[i]))
        .collect();

    let name = match matches.get_one::<String>("name") {
        Some(name) => name.clone(),
        None => match prompt("Group name: ")? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    match repo.create(&name, windows) {
        Ok(group) => {
            println!("✅ Group '{}' created!", group.name);
            println!("   Windows: {}", group.windows.len());
            println!("   Applications: {}", group.application_names().join(", "));
            info!(
                event = "cli.create_completed",
                created = true,
                group_id = %group.id
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Failed to create group: {}", e);
            error!(event = "cli.create_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
