//! CLI command definition and argument parsing.
//!
//! The CLI has a single command: log in, fetch the rack collection, then the
//! contents and details of the first rack, once per requested format.

use clap::Command;
use color_print::cstr;

pub mod params;

pub use params::{
    PARAMETER_API, PARAMETER_JSON, PARAMETER_OUTPUT, PARAMETER_PASSWORD,
    PARAMETER_PROMPT_PASSWORD, PARAMETER_TIMEOUT, PARAMETER_USERNAME, PARAMETER_VERBOSE,
    PARAMETER_XML,
};

const AFTER_HELP: &str = cstr!(
    r#"<bold><underline>Example:</underline></bold>
  rackapi -u test -p test12 -j http://ramp.example.com/api/

At least one of <bold>--json</bold> or <bold>--xml</bold> is required. Results are written to
racks, rackContents and rack files (.json or .xml) in the output directory."#
);

/// Create the CLI command and all of its arguments.
pub fn create_cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .after_help(AFTER_HELP)
        .arg(params::api_parameter())
        .arg(params::username_parameter())
        .arg(params::password_parameter())
        .arg(params::prompt_password_parameter())
        .arg(params::json_parameter())
        .arg(params::xml_parameter())
        .arg(params::output_parameter())
        .arg(params::timeout_parameter())
        .arg(params::verbose_parameter())
}
