use clap::ArgMatches;
use tracing::{error, info};

use casement_core::events;
use casement_core::switching::restore_all;

use super::helpers::{load_config_with_warning, print_switch_error, window_server};

pub(crate) fn handle_restore_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.restore_started");

    let config = load_config_with_warning();
    let server = window_server(&config);

    match restore_all(&server) {
        Ok(()) => {
            println!("✅ All windows restored");
            info!(event = "cli.restore_completed");
            Ok(())
        }
        Err(e) => {
            print_switch_error("Failed to restore windows", &e);
            error!(event = "cli.restore_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}
