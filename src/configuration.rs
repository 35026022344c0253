use crate::output::DEFAULT_OUTPUT_DIRECTORY;
use crate::transport::DEFAULT_TIMEOUT_SECS;
use dirs::config_dir;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "rackapi";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV: &str = "RACKAPI_CONFIG_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration data, because of: {cause}")]
    FailedToLoadData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Defaults for a run, read from `config.yml`. Command line arguments win.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Configuration {
    api_url: Option<Url>,
    username: Option<String>,
    output_directory: PathBuf,
    timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            api_url: None,
            username: None,
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Configuration {
    pub fn api_url(&self) -> Option<&Url> {
        self.api_url.as_ref()
    }

    pub fn set_api_url(&mut self, api_url: Url) {
        self.api_url = Some(api_url);
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: String) {
        self.username = Some(username);
    }

    pub fn output_directory(&self) -> &PathBuf {
        &self.output_directory
    }

    pub fn set_output_directory(&mut self, output_directory: PathBuf) {
        self.output_directory = output_directory;
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn set_timeout_secs(&mut self, timeout_secs: u64) {
        self.timeout_secs = timeout_secs;
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        // Check for RACKAPI_CONFIG_DIR environment variable first
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV) {
            let mut config_path = PathBuf::from(config_dir_str);
            config_path.push(DEFAULT_CONFIGURATION_FILE_NAME);
            return Ok(config_path);
        }

        match config_dir() {
            Some(configuration_directory) => {
                let mut default_config_file_path = configuration_directory;
                default_config_file_path.push(DEFAULT_APPLICATION_ID);
                default_config_file_path.push(DEFAULT_CONFIGURATION_FILE_NAME);

                Ok(default_config_file_path)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    /// Loads the default configuration file, falling back to defaults when
    /// there is none. A file that exists but cannot be read is an error.
    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = match Configuration::get_default_configuration_file_path() {
            Ok(path) => path,
            Err(ConfigurationError::FailedToFindConfigurationDirectory) => {
                debug!("No configuration directory available, using defaults");
                return Ok(Configuration::default());
            }
            Err(e) => return Err(e),
        };

        if !default_file_path.exists() {
            debug!(
                "Configuration file {} not found, using defaults",
                default_file_path.display()
            );
            return Ok(Configuration::default());
        }

        debug!("Loading configuration from {}...", default_file_path.display());
        Configuration::load_from_file(default_file_path)
    }

    pub fn load_from_file(path: PathBuf) -> Result<Configuration, ConfigurationError> {
        let configuration = fs::read_to_string(path)
            .map_err(|cause| ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            })?;

        serde_yaml::from_str(&configuration).map_err(|cause| {
            ConfigurationError::FailedToLoadData {
                cause: Box::new(cause),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let configuration = Configuration::default();
        assert!(configuration.api_url().is_none());
        assert!(configuration.username().is_none());
        assert_eq!(configuration.output_directory(), &PathBuf::from("output"));
        assert_eq!(configuration.timeout_secs(), 20);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(&path, "username: test\ntimeout_secs: 5\n").unwrap();

        let configuration = Configuration::load_from_file(path).unwrap();
        assert_eq!(configuration.username(), Some("test"));
        assert_eq!(configuration.timeout_secs(), 5);
        assert_eq!(configuration.output_directory(), &PathBuf::from("output"));
    }

    #[test]
    fn test_full_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(
            &path,
            "api_url: http://host/api/\nusername: test\noutput_directory: results\ntimeout_secs: 60\n",
        )
        .unwrap();

        let configuration = Configuration::load_from_file(path).unwrap();
        assert_eq!(
            configuration.api_url().map(Url::as_str),
            Some("http://host/api/")
        );
        assert_eq!(configuration.output_directory(), &PathBuf::from("results"));
        assert_eq!(configuration.timeout_secs(), 60);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(DEFAULT_CONFIGURATION_FILE_NAME);
        fs::write(&path, "api_url: not a url\n").unwrap();

        assert!(matches!(
            Configuration::load_from_file(path),
            Err(ConfigurationError::FailedToLoadData { .. })
        ));
    }
}
