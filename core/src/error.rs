//! Error types for the qrcode.show client.
//!
//! # Design
//! Non-2xx responses land in `HttpError` with the raw status code and the
//! body the service sent, because the service explains rejections (a bad
//! header value, an empty payload) in that body. The remaining variants are
//! raised before any request leaves the process.

use thiserror::Error;

/// Errors returned by `QrClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service returned a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The text or body to encode was empty.
    #[error("nothing to encode: input is empty")]
    EmptyInput,

    /// A rendering option could not be parsed or is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// An image format was requested but the service answered with
    /// something else.
    #[error("expected {expected} response, got {actual}")]
    UnexpectedContentType { expected: String, actual: String },
}

impl ApiError {
    /// Body the service sent with a failed response, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::HttpError { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// Status code of a failed response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_exposed_for_http_errors() {
        let err = ApiError::HttpError {
            status: 400,
            body: "Bad Request".to_string(),
        };
        assert_eq!(err.body(), Some("Bad Request"));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.to_string(), "HTTP 400: Bad Request");
    }

    #[test]
    fn empty_body_is_absent() {
        let err = ApiError::HttpError {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.body(), None);
        assert_eq!(ApiError::EmptyInput.body(), None);
        assert_eq!(ApiError::EmptyInput.status(), None);
    }
}
