use clap::ArgMatches;
use tracing::{error, info};

use casement_core::events;
use casement_core::switching::minimize_all;

use super::helpers::{load_config_with_warning, print_switch_error, window_server};

pub(crate) fn handle_hide_command(_matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.hide_started");

    let config = load_config_with_warning();
    let server = window_server(&config);

    match minimize_all(&server) {
        Ok(count) => {
            println!("✅ Minimized {} window(s)", count);
            println!("   Run 'casement restore' to bring them back.");
            info!(event = "cli.hide_completed", minimized = count);
            Ok(())
        }
        Err(e) => {
            print_switch_error("Failed to minimize windows", &e);
            error!(event = "cli.hide_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
