//! Error types for the qrshow command-line client

use qrshow_core::ApiError;
use thiserror::Error;

/// Result type alias using qrshow's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrshow operations
#[derive(Error, Debug)]
pub enum Error {
    /// Request building, validation or a non-success response
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Body the service sent with a failed response, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Api(e) => e.body(),
            _ => None,
        }
    }

    /// What to tell the user: the service's own explanation when it sent
    /// one, the error itself otherwise.
    pub fn failure_message(&self) -> String {
        match self.response_body() {
            Some(body) => body.to_string(),
            None => self.to_string(),
        }
    }
}

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(format!("TOML error: {e}"))
    }
}
