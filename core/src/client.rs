//! Stateless HTTP request builder and response parser for qrcode.show.
//!
//! # Design
//! `QrClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::QrOptions;
use crate::types::Format;

/// Public instance of the service.
pub const DEFAULT_BASE_URL: &str = "http://qrcode.show";

/// Bytes escaped when text is placed in the URL path. The service reads the
/// path back without decoding it, so only what cannot travel raw is escaped.
/// An inner `?` stays because the service glues `path?query` back together.
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Result of a successful generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrOutput {
    /// A text rendering (unicode, plain text, SVG or HTML).
    Text(String),
    /// Image data, kept byte-for-byte.
    Binary { content_type: String, bytes: Vec<u8> },
}

impl QrOutput {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            QrOutput::Text(text) => Some(text),
            QrOutput::Binary { .. } => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            QrOutput::Text(text) => text.as_bytes(),
            QrOutput::Binary { bytes, .. } => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, QrOutput::Binary { .. })
    }
}

/// Synchronous, stateless client for the qrcode.show API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct QrClient {
    base_url: String,
}

impl Default for QrClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl QrClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /<text>`: the text travels in the URL path.
    pub fn build_get(&self, text: &str, options: &QrOptions) -> Result<HttpRequest, ApiError> {
        if text.is_empty() {
            return Err(ApiError::EmptyInput);
        }
        let path = encode_path(text);
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/{path}", self.base_url),
            headers: options.headers()?,
            body: None,
        })
    }

    /// `POST /` with the text as a verbatim plain-text body.
    pub fn build_post(&self, body: &str, options: &QrOptions) -> Result<HttpRequest, ApiError> {
        if body.is_empty() {
            return Err(ApiError::EmptyInput);
        }
        let mut headers = vec![("content-type".to_string(), "text/plain".to_string())];
        headers.extend(options.headers()?);
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/", self.base_url),
            headers,
            body: Some(body.to_string()),
        })
    }

    /// `GET /`: the service's usage text, or its landing page for HTML.
    pub fn build_help(&self, format: Format) -> Result<HttpRequest, ApiError> {
        if format.is_binary() || format == Format::Svg {
            return Err(ApiError::InvalidOption(format!(
                "help is only available as text or html, not {format}"
            )));
        }
        let options = QrOptions::new().format(format);
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/", self.base_url),
            headers: options.headers()?,
            body: None,
        })
    }

    /// Interpret a response to a generation request made with `format`.
    pub fn parse_output(&self, response: HttpResponse, format: Format) -> Result<QrOutput, ApiError> {
        check_status(&response, 200)?;

        if !format.is_binary() {
            let text = match String::from_utf8(response.body) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            };
            return Ok(QrOutput::Text(text));
        }

        let expected = format.accept().unwrap_or("application/octet-stream");
        let content_type = response.content_type().unwrap_or_else(|| expected.to_string());
        if content_type.starts_with("text/") {
            return Err(ApiError::UnexpectedContentType {
                expected: expected.to_string(),
                actual: content_type,
            });
        }
        Ok(QrOutput::Binary {
            content_type,
            bytes: response.body,
        })
    }

    /// Text rendering of a response, whatever format was requested.
    pub fn parse_text(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        Ok(response.text().into_owned())
    }

    /// Raw image bytes of a response to a PNG or JPEG request.
    pub fn parse_image(&self, response: HttpResponse, format: Format) -> Result<Vec<u8>, ApiError> {
        if !format.is_binary() {
            return Err(ApiError::InvalidOption(format!("{format} is not an image format")));
        }
        match self.parse_output(response, format)? {
            QrOutput::Binary { bytes, .. } => Ok(bytes),
            QrOutput::Text(text) => Ok(text.into_bytes()),
        }
    }
}

/// Percent-encode `text` for use as the URL path.
///
/// A leading `?` is escaped as `%3F`: left raw it would start the query and
/// leave the path empty, which the service answers with its help page.
pub fn encode_path(text: &str) -> String {
    match text.strip_prefix('?') {
        Some(rest) => format!("%3F{}", utf8_percent_encode(rest, PATH_ENCODE_SET)),
        None => utf8_percent_encode(text, PATH_ENCODE_SET).to_string(),
    }
}

/// Map non-success status codes to `ApiError::HttpError`.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.text().trim_end().to_string(),
    })
}
