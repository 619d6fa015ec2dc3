use clap::ArgMatches;
use tracing::{error, info, warn};

use casement_core::groups::GroupRepository;
use casement_core::windows::matcher::locate;
use casement_core::{Group, WindowServer, events};

use super::helpers::{
    group_repository, is_confirmation_accepted, load_config_with_warning,
    load_groups_with_warning, parse_index, prompt, window_server,
};
use crate::table::GroupTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManageAction {
    Show(usize),
    Delete(usize),
    Quit,
}

fn parse_manage_action(input: &str, count: usize) -> Option<ManageAction> {
    let mut parts = input.split_whitespace();
    let verb = parts.next()?;
    let arg = parts.next();
    if parts.next().is_some() {
        return None;
    }

    match (verb, arg) {
        ("q" | "quit", None) => Some(ManageAction::Quit),
        ("show" | "s", Some(n)) => parse_index(n, count).map(ManageAction::Show),
        ("delete" | "d", Some(n)) => parse_index(n, count).map(ManageAction::Delete),
        _ => None,
    }
}

pub(crate) fn handle_manage_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let server = window_server(&config);
    let repo = group_repository(&config);

    info!(event = "cli.manage_started");

    loop {
        let groups = load_groups_with_warning(&repo);
        if groups.is_empty() {
            println!("No groups saved.");
            break;
        }

        println!();
        GroupTable::new(&groups).print_table(&groups);
        let Some(input) = prompt("Command (show <n>, delete <n>, q): ")? else {
            break;
        };

        match parse_manage_action(&input, groups.len()) {
            Some(ManageAction::Quit) => break,
            Some(ManageAction::Show(index)) => show_group(&server, &groups[index]),
            Some(ManageAction::Delete(index)) => delete_group(&repo, &groups[index])?,
            None => println!("Unrecognized command: '{}'", input),
        }
    }

    info!(event = "cli.manage_completed");
    Ok(())
}

/// Print a group's windows with their live state.
fn show_group(server: &dyn WindowServer, group: &Group) {
    println!("Group '{}':", group.name);

    let snapshot = match server.list_visible_windows() {
        Ok(windows) => Some(windows),
        Err(e) => {
            warn!(event = "cli.manage_snapshot_failed", error = %e);
            eprintln!("⚠️  Could not check live windows: {}", e);
            None
        }
    };

    match &snapshot {
        Some(snapshot) => {
            for (reference, live) in locate(&group.windows, snapshot) {
                let state = if live.is_some() { "visible" } else { "hidden or missing" };
                println!("   {} ({})", reference, state);
            }
        }
        None => {
            for reference in &group.windows {
                println!("   {}", reference);
            }
        }
    }
}

fn delete_group(repo: &GroupRepository, group: &Group) -> Result<(), Box<dyn std::error::Error>> {
    let Some(answer) = prompt(&format!("Delete group '{}'? [y/N] ", group.name))? else {
        return Ok(());
    };
    if !is_confirmation_accepted(&answer) {
        println!("Aborted.");
        info!(event = "cli.manage_delete_aborted", group_id = %group.id);
        return Ok(());
    }

    match repo.delete(&group.id) {
        Ok(()) => {
            println!("✅ Group '{}' deleted", group.name);
            info!(event = "cli.manage_delete_completed", group_id = %group.id);
        }
        Err(e) => {
            eprintln!("❌ Failed to delete group '{}': {}", group.name, e);
            error!(event = "cli.manage_delete_failed", group_id = %group.id, error = %e);
            events::log_app_error(&e);
        }
    }
    Ok(())
}
