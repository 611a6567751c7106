//! Binary entry point: parse arguments and dispatch to a command.
//!
//! Errors from commands are reported through the logger and turn into a
//! non-zero exit code; help and version output exit cleanly.

use nighttemp::args::{self, CliAction, ParsedArgs};
use nighttemp::commands;
use nighttemp::common::constants::EXIT_FAILURE;

#[tokio::main]
async fn main() {
    let parsed_args = ParsedArgs::from_env();

    let result = match parsed_args.action {
        CliAction::ShowVersion => {
            args::display_version_info();
            Ok(())
        }
        CliAction::ShowHelp => {
            args::display_help();
            Ok(())
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Help { command } => {
            commands::help::run_help_command(command.as_deref());
            Ok(())
        }
        CliAction::Serve {
            options,
            bind,
            port,
        } => commands::serve::handle_serve_command(&options, bind, port).await,
        CliAction::Get {
            options,
            latitude,
            longitude,
            at,
            provider,
        } => commands::get::handle_get_command(&options, latitude, longitude, at, provider).await,
        CliAction::Compute {
            options,
            phases,
            at,
        } => commands::compute::handle_compute_command(&options, phases, at),
    };

    if let Err(e) = result {
        nighttemp::log_error_exit!("{:#}", e);
        std::process::exit(EXIT_FAILURE);
    }
}
