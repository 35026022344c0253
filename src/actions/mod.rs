//! What the CLI does with its arguments.

use crate::{
    client::ApiClient,
    commands::params::{
        PARAMETER_API, PARAMETER_JSON, PARAMETER_OUTPUT, PARAMETER_PASSWORD,
        PARAMETER_PROMPT_PASSWORD, PARAMETER_TIMEOUT, PARAMETER_USERNAME, PARAMETER_XML,
    },
    configuration::Configuration,
    error::CliError,
    format::WireFormat,
    settings::Settings,
    transport::HttpTransport,
};
use clap::{ArgMatches, Command};
use inquire::{Password, PasswordDisplayMode};
use std::path::PathBuf;
use tracing::{debug, info_span};
use url::Url;

pub mod run;

/// Everything a run needs, resolved from the command line and configuration.
#[derive(Debug)]
pub struct RunOptions {
    pub settings: Settings,
    pub formats: Vec<WireFormat>,
    pub output_directory: PathBuf,
    pub timeout: u64,
}

/// Formats requested on the command line, JSON first.
pub fn requested_formats(matches: &ArgMatches) -> Vec<WireFormat> {
    let mut formats = Vec::new();
    if matches.get_flag(PARAMETER_JSON) {
        formats.push(WireFormat::Json);
    }
    if matches.get_flag(PARAMETER_XML) {
        formats.push(WireFormat::Xml);
    }
    formats
}

/// Combines command line arguments with the configuration defaults.
///
/// `password` is the already resolved password, so that prompting stays out
/// of this function.
pub fn resolve_options(
    matches: &ArgMatches,
    configuration: &Configuration,
    password: String,
) -> Result<RunOptions, CliError> {
    let api: Url = matches
        .get_one::<Url>(PARAMETER_API)
        .or(configuration.api_url())
        .cloned()
        .ok_or_else(|| CliError::MissingRequiredArgument("API url".to_string()))?;

    let username = matches
        .get_one::<String>(PARAMETER_USERNAME)
        .map(String::as_str)
        .or(configuration.username())
        .unwrap_or_default();

    let output_directory = matches
        .get_one::<PathBuf>(PARAMETER_OUTPUT)
        .unwrap_or(configuration.output_directory())
        .clone();

    let timeout = matches
        .get_one::<u64>(PARAMETER_TIMEOUT)
        .copied()
        .unwrap_or(configuration.timeout_secs());

    Ok(RunOptions {
        settings: Settings::new(api)
            .with_username(username)
            .with_password(password),
        formats: requested_formats(matches),
        output_directory,
        timeout,
    })
}

fn prompt_password() -> Result<String, CliError> {
    let password = Password::new("Enter your password:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    Ok(password)
}

/// Runs the CLI for the parsed `matches`.
///
/// Shows help and returns when neither `--json` nor `--xml` was given.
pub fn execute_command(
    command: &mut Command,
    matches: &ArgMatches,
    configuration: Configuration,
) -> Result<(), CliError> {
    if requested_formats(matches).is_empty() {
        command.print_help()?;
        return Ok(());
    }

    let password = if matches.get_flag(PARAMETER_PROMPT_PASSWORD) {
        prompt_password()?
    } else {
        matches
            .get_one::<String>(PARAMETER_PASSWORD)
            .cloned()
            .unwrap_or_default()
    };

    let mut options = resolve_options(matches, &configuration, password)?;
    debug!("Running with {:?}", options);

    let transport = HttpTransport::with_timeout(options.timeout)?;
    for format in options.formats.clone() {
        let span = info_span!("api", %format);
        let client = ApiClient::new(format, transport.clone(), span);
        run::run_format(&client, &mut options.settings, &options.output_directory)?;
    }

    println!("Complete.");
    Ok(())
}
