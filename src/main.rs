use rackapi::{
    actions::execute_command,
    commands::{create_cli_command, PARAMETER_VERBOSE},
    configuration::Configuration,
    error::CliError,
};
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
fn main() {
    let mut command = create_cli_command();
    let matches = command.get_matches_mut();

    // Initialize the logging subsystem; RUST_LOG takes precedence over --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) {
        "debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result: Result<(), CliError> = Configuration::load_default()
        .map_err(CliError::from)
        .and_then(|configuration| execute_command(&mut command, &matches, configuration));

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        ::std::process::exit(e.exit_code().code());
    }
}
