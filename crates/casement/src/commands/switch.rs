use clap::ArgMatches;
use tracing::{error, info};

use casement_core::groups::GroupRepository;
use casement_core::switching::{ActiveGroup, SwitchOutcome, restore_all, switch_to};
use casement_core::{Group, WindowServer, events};

use super::helpers::{
    group_repository, load_config_with_warning, load_groups_with_warning, parse_index,
    print_switch_error, print_switch_result, prompt, window_server,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PickerChoice {
    ShowAll,
    Group(usize),
    Reload,
    Quit,
}

fn parse_picker_choice(input: &str, count: usize) -> Option<PickerChoice> {
    match input.trim() {
        "q" | "Q" => Some(PickerChoice::Quit),
        "r" | "R" => Some(PickerChoice::Reload),
        "0" => Some(PickerChoice::ShowAll),
        other => parse_index(other, count).map(PickerChoice::Group),
    }
}

pub(crate) fn handle_switch_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_warning();
    let server = window_server(&config);
    let repo = group_repository(&config);

    match matches.get_one::<String>("name") {
        Some(name) => switch_by_name(&server, &repo, name),
        None => run_picker(&server, &repo),
    }
}

fn switch_by_name(
    server: &dyn WindowServer,
    repo: &GroupRepository,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.switch_started", name = name);

    let groups = load_groups_with_warning(repo);
    let Some(group) = groups.iter().find(|g| g.has_name(name)) else {
        eprintln!("❌ No group named '{}'", name);
        error!(event = "cli.switch_failed", name = name, reason = "not_found");
        return Err(format!("No group named '{}'", name).into());
    };

    match switch_to(server, group) {
        Ok(result) => {
            print_switch_result(group, &result);
            info!(
                event = "cli.switch_completed",
                name = name,
                outcome = ?result.outcome()
            );
            if result.outcome() == SwitchOutcome::Failed {
                return Err(format!("No windows of '{}' were shown", group.name).into());
            }
            Ok(())
        }
        Err(e) => {
            print_switch_error(&format!("Failed to switch to '{}'", group.name), &e);
            error!(event = "cli.switch_failed", name = name, error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn print_menu(groups: &[Group], active: &ActiveGroup) {
    println!();
    println!("   0) Show all windows");
    for (i, group) in groups.iter().enumerate() {
        let marker = if active.is_active(group) { "●" } else { " " };
        println!(
            " {} {}) {} ({} window(s))",
            marker,
            i + 1,
            group.name,
            group.windows.len()
        );
    }
}

/// Re-read groups from disk. The active marker does not survive a reload.
fn reload_groups(repo: &GroupRepository, active: &mut ActiveGroup) -> Vec<Group> {
    let groups = load_groups_with_warning(repo);
    active.clear();
    info!(event = "cli.switch_picker_reloaded", count = groups.len());
    groups
}

/// Interactive picker. Loops until `q`; `r` reloads groups from disk.
fn run_picker(
    server: &dyn WindowServer,
    repo: &GroupRepository,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.switch_picker_started");

    let mut active = ActiveGroup::new();
    let mut groups = reload_groups(repo, &mut active);

    loop {
        if groups.is_empty() {
            println!("No groups saved. Create one with 'casement create'.");
            break;
        }

        print_menu(&groups, &active);
        let Some(input) = prompt("Switch to (number, r to reload, q to quit): ")? else {
            break;
        };

        match parse_picker_choice(&input, groups.len()) {
            Some(PickerChoice::Quit) => break,
            Some(PickerChoice::Reload) => groups = reload_groups(repo, &mut active),
            Some(PickerChoice::ShowAll) => match restore_all(server) {
                Ok(()) => {
                    active.clear();
                    println!("✅ All windows restored");
                }
                Err(e) => {
                    print_switch_error("Failed to restore windows", &e);
                    events::log_app_error(&e);
                }
            },
            Some(PickerChoice::Group(index)) => {
                let group = &groups[index];
                match switch_to(server, group) {
                    Ok(result) => {
                        print_switch_result(group, &result);
                        if result.outcome() != SwitchOutcome::Failed {
                            active.mark(group);
                        }
                    }
                    Err(e) => {
                        print_switch_error(&format!("Failed to switch to '{}'", group.name), &e);
                        events::log_app_error(&e);
                    }
                }
            }
            None => println!("Enter 0-{}, r or q", groups.len()),
        }
    }

    info!(event = "cli.switch_picker_completed");
    Ok(())
}
