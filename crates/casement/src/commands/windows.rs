use std::collections::HashMap;

use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info};

use casement_core::windows::matcher::claimed_keys;
use casement_core::{LiveWindow, WindowServer, events};

use super::helpers::{
    group_repository, load_config_with_warning, load_groups_with_warning, window_server,
};

/// A live window plus the group that claims it, if any.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowEntry<'a> {
    #[serde(flatten)]
    window: &'a LiveWindow,
    group: Option<&'a str>,
}

fn annotate<'a>(
    snapshot: &'a [LiveWindow],
    claimed: &'a HashMap<String, String>,
) -> Vec<WindowEntry<'a>> {
    snapshot
        .iter()
        .map(|window| WindowEntry {
            window,
            group: claimed.get(&window.match_key()).map(String::as_str),
        })
        .collect()
}

pub(crate) fn handle_windows_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.windows_started", json_output = json_output);

    let config = load_config_with_warning();
    let server = window_server(&config);
    let repo = group_repository(&config);

    let snapshot = match server.list_visible_windows() {
        Ok(windows) => windows,
        Err(e) => {
            eprintln!("❌ Failed to list windows: {}", e);
            if let Some(hint) = e.hint() {
                eprintln!("   Hint: {}", hint);
            }
            error!(event = "cli.windows_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let groups = load_groups_with_warning(&repo);
    let claimed = claimed_keys(&groups);
    let entries = annotate(&snapshot, &claimed);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No visible windows.");
    } else {
        println!("Visible windows:");
        for entry in &entries {
            match entry.group {
                Some(group) => println!("   {} [{}]", entry.window, group),
                None => println!("   {}", entry.window),
            }
        }
    }

    info!(event = "cli.windows_completed", count = entries.len());
    Ok(())
}
