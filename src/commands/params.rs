//! Command line parameters.
//!
//! Parameter names and the constructors for every argument the CLI accepts.

use clap::{Arg, ArgAction};
use std::path::PathBuf;
use url::Url;

// Parameter names
pub const PARAMETER_API: &str = "api";
pub const PARAMETER_USERNAME: &str = "username";
pub const PARAMETER_PASSWORD: &str = "password";
pub const PARAMETER_PROMPT_PASSWORD: &str = "prompt-password";
pub const PARAMETER_JSON: &str = "json";
pub const PARAMETER_XML: &str = "xml";
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_TIMEOUT: &str = "timeout";
pub const PARAMETER_VERBOSE: &str = "verbose";

// Environment variables
pub const ENV_API: &str = "RACKAPI_URL";
pub const ENV_USERNAME: &str = "RACKAPI_USERNAME";
pub const ENV_PASSWORD: &str = "RACKAPI_PASSWORD";

/// The API base URL, e.g. `http://host/api/`.
pub fn api_parameter() -> Arg {
    Arg::new(PARAMETER_API)
        .num_args(1)
        .required(false)
        .env(ENV_API)
        .value_name("API")
        .value_parser(clap::value_parser!(Url))
        .help("The url of the API (keep the trailing slash, e.g. http://host/api/)")
}

pub fn username_parameter() -> Arg {
    Arg::new(PARAMETER_USERNAME)
        .short('u')
        .long(PARAMETER_USERNAME)
        .num_args(1)
        .required(false)
        .env(ENV_USERNAME)
        .help("The username used to log in")
}

pub fn password_parameter() -> Arg {
    Arg::new(PARAMETER_PASSWORD)
        .short('p')
        .long(PARAMETER_PASSWORD)
        .num_args(1)
        .required(false)
        .env(ENV_PASSWORD)
        .hide_env_values(true)
        .conflicts_with(PARAMETER_PROMPT_PASSWORD)
        .help("The password for the user")
}

pub fn prompt_password_parameter() -> Arg {
    Arg::new(PARAMETER_PROMPT_PASSWORD)
        .short('e')
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Prompt for the password instead of passing it")
}

pub fn json_parameter() -> Arg {
    Arg::new(PARAMETER_JSON)
        .short('j')
        .long(PARAMETER_JSON)
        .action(ArgAction::SetTrue)
        .help("Request and save the results as JSON")
}

pub fn xml_parameter() -> Arg {
    Arg::new(PARAMETER_XML)
        .short('x')
        .long(PARAMETER_XML)
        .action(ArgAction::SetTrue)
        .help("Request and save the results as XML")
}

pub fn output_parameter() -> Arg {
    Arg::new(PARAMETER_OUTPUT)
        .short('o')
        .long(PARAMETER_OUTPUT)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Directory the results are written to [default: output]")
}

pub fn timeout_parameter() -> Arg {
    Arg::new(PARAMETER_TIMEOUT)
        .short('t')
        .long(PARAMETER_TIMEOUT)
        .num_args(1)
        .required(false)
        .value_name("SECONDS")
        .value_parser(clap::value_parser!(u64).range(1..))
        .help("Timeout for each request in seconds [default: 20]")
}

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .help("Enable verbose output for debugging")
}
