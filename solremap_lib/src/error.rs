//! The `error` module contains `SolremapError`, the error enumeration used to communicate
//! library errors.

use std::convert::From;
use thiserror::Error;

/// The list of errors that the library can generate.
#[derive(Error, Debug)]
pub enum SolremapError {
    #[error("IO error: {0}")]
    IO(std::io::Error),

    /// An error indicating that JSON parsing failed.
    #[error("JSON error occurred: {0}")]
    JSON(serde_json::Error),

    /// An error indicating the tool could not read the remappings file.  Missing or
    /// unreadable remappings abort the preprocessing pass.
    #[error("Unable to read remappings file {0}: {1}")]
    RemappingsFile(String, std::io::Error),

    /// An error indicating that the tool received a config file that it does not support or
    /// cannot support in the current function.
    #[error("Configuration file {0} not supported")]
    ConfigFileNotSupported(String),

    /// An error indicating that the tool received a configuration file that does not have the
    /// correct file extension.
    #[error("Configuration file {0} does not have the correct extension")]
    ConfigFileBadExtension(String),

    /// An error indicating that configuration file keys are missing.
    #[error("Configuration file {0} does not have keys: {1:?}")]
    ConfigFileMissingRequiredKey(String, Vec<String>),

    /// An error indicating a request for a network that the configuration file does not
    /// declare.
    #[error("Network {0} not declared in the configuration file")]
    NetworkNotConfigured(String),

    /// An error indicating a declared network without a chain id.
    #[error("Network {0} does not specify a chain id")]
    NetworkMissingChainId(String),

    /// An error indicating a required environment variable had no value at startup.
    #[error("Environment variable {0} is not set")]
    MissingEnvironmentVariable(String),
}

impl From<std::io::Error> for SolremapError {
    fn from(e: std::io::Error) -> Self {
        SolremapError::IO(e)
    }
}

impl From<serde_json::Error> for SolremapError {
    fn from(e: serde_json::Error) -> Self {
        SolremapError::JSON(e)
    }
}
