use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("casement")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Save groups of macOS windows and switch between them")
        .long_about("casement remembers named groups of windows. Switching to a group minimizes every other window and brings the group's windows to the front. The terminal casement runs in is never touched.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create")
                .about("Create a group from currently visible windows")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .short('n')
                        .help("Group name (prompted for when omitted)")
                )
        )
        .subcommand(
            Command::new("switch")
                .about("Switch to a group (interactive picker when no name is given)")
                .arg(
                    Arg::new("name")
                        .help("Name of the group to switch to (case-insensitive)")
                        .index(1)
                )
        )
        .subcommand(
            Command::new("manage")
                .about("Inspect and delete saved groups")
        )
        .subcommand(
            Command::new("list")
                .about("List saved groups")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("restore")
                .about("Show every window of every application again")
        )
        .subcommand(
            Command::new("hide")
                .about("Minimize every visible window")
        )
        .subcommand(
            Command::new("windows")
                .about("List visible windows and the group that claims each")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(clap::value_parser!(Shell))
                )
        )
}
