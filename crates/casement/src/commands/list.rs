use clap::ArgMatches;
use tracing::info;

use super::helpers::{group_repository, load_config_with_warning, load_groups_with_warning};
use crate::table::GroupTable;

pub(crate) fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    info!(event = "cli.list_started", json_output = json_output);

    let config = load_config_with_warning();
    let repo = group_repository(&config);
    let groups = load_groups_with_warning(&repo);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else if groups.is_empty() {
        println!("No groups saved.");
    } else {
        println!("Saved groups:");
        GroupTable::new(&groups).print_table(&groups);
    }

    info!(event = "cli.list_completed", count = groups.len());
    Ok(())
}
