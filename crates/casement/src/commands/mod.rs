use clap::ArgMatches;
use tracing::error;

use casement_core::events;

pub mod helpers;

mod completions;
mod create;
mod hide;
mod list;
mod manage;
mod restore;
mod switch;
mod windows;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("create", sub_matches)) => create::handle_create_command(sub_matches),
        Some(("switch", sub_matches)) => switch::handle_switch_command(sub_matches),
        Some(("manage", sub_matches)) => manage::handle_manage_command(sub_matches),
        Some(("list", sub_matches)) => list::handle_list_command(sub_matches),
        Some(("restore", sub_matches)) => restore::handle_restore_command(sub_matches),
        Some(("hide", sub_matches)) => hide::handle_hide_command(sub_matches),
        Some(("windows", sub_matches)) => windows::handle_windows_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
