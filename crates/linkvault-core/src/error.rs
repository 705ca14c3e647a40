//! Error types for linkvault-core

use thiserror::Error;

use crate::api::ApiError;
use crate::models::FolderId;
use crate::session::SessionError;

/// Result type alias using linkvault-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in linkvault-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Backend request failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session persistence failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Invalid input rejected before any request was issued
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Re-parenting would make a folder its own ancestor
    #[error("Folder {folder} cannot be moved under {parent}: it would become its own ancestor")]
    FolderCycle { folder: FolderId, parent: FolderId },

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failure happened before the request reached the backend.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_network())
    }

    /// HTTP status of the failed response, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(api) => api.status(),
            _ => None,
        }
    }
}
