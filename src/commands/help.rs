//! Help command: general help or detailed help for one command.

/// Run the help command (dispatcher)
///
/// # Arguments
/// * `command` - Optional command name to get help for (None = general help)
pub fn run_help_command(command: Option<&str>) {
    match command {
        None => display_general_help(),
        Some("serve") => super::serve::display_help(),
        Some("get") => super::get::display_help(),
        Some("compute") => super::compute::display_help(),
        Some("help") => display_help_help(),
        Some(unknown) => {
            log_warning_standalone!("Unknown command: {}", unknown);
            display_general_help();
        }
    }
}

fn display_general_help() {
    log_version!();
    log_block_start!("Available Commands:");
    log_indented!("serve                  Run the HTTP service (default)");
    log_indented!("get --lat --lng        Temperature for a position");
    log_indented!("compute                Temperature from explicit sun phase times");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_pipe!();
    log_info!("Use 'nighttemp help <command>' to see detailed help for a specific command.");
    log_indented!("Use 'nighttemp --help' to see all options and general usage.");
    log_end!();
}

fn display_help_help() {
    log_version!();
    log_block_start!("help - Display help information");
    log_block_start!("Usage: nighttemp help [COMMAND]");
    log_block_start!("Examples:");
    log_indented!("nighttemp help");
    log_indented!("nighttemp help compute");
    log_end!();
}
