use thiserror::Error;

use crate::{configuration::ConfigurationError, exit_codes::RackApiExitCode, output::OutputError};

/// Error types that can occur while running the CLI
///
/// Failed API calls are not errors at this level: the client logs them and
/// the affected output file is simply not written.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when a required command-line argument is missing
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// Error related to configuration loading
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error when the interactive password prompt fails or is cancelled
    #[error("Failed to read password: {0}")]
    PasswordPromptError(#[from] inquire::InquireError),
    /// Error when the HTTP client cannot be created
    #[error("Failed to create HTTP client: {0}")]
    HttpClientError(#[from] reqwest::Error),
    /// Error when results cannot be written
    #[error("{0}")]
    OutputError(#[from] OutputError),
    /// Error when writing to the terminal fails
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> RackApiExitCode {
        match self {
            CliError::MissingRequiredArgument(_) => RackApiExitCode::UsageError,
            CliError::ConfigurationError(_) => RackApiExitCode::ConfigError,
            CliError::PasswordPromptError(_) => RackApiExitCode::IoError,
            CliError::HttpClientError(_) => RackApiExitCode::SoftwareError,
            CliError::OutputError(_) => RackApiExitCode::CantCreate,
            CliError::IoError(_) => RackApiExitCode::IoError,
        }
    }
}
