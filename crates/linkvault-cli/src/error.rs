use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] linkvault_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("{0}")]
    Auth(String),
    /// An action the backend did not confirm; carries the user-facing text.
    #[error("{0}")]
    Action(String),
}

impl From<linkvault_core::api::ApiError> for CliError {
    fn from(error: linkvault_core::api::ApiError) -> Self {
        Self::Core(error.into())
    }
}

impl From<linkvault_core::session::SessionError> for CliError {
    fn from(error: linkvault_core::session::SessionError) -> Self {
        Self::Core(error.into())
    }
}
