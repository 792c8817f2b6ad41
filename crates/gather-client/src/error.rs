//! Client error types

use gather_core::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Non-2xx response carrying the server's structured payload.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ClientError {
    /// User-facing message, the server's own wording where available.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of an API rejection, if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
