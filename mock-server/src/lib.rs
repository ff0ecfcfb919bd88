//! Local stand-in for qrcode.show.
//!
//! Mirrors the service's request handling: routing, header parsing and
//! validation, content types and status codes. It never encodes a QR code;
//! the "rendering" is a deterministic description of what was asked for, so
//! tests can see exactly which payload and headers arrived.

use axum::{
    body::Bytes,
    extract::OriginalUri,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;

pub const HELP: &str = "\
qrcode.show mock

  GET  /<text>            render <text>
  POST /                  render the request body

Headers:
  Accept                  text/plain, text/html, image/svg+xml, image/png, image/jpeg
  X-QR-Width, X-QR-Height, X-QR-Min-Width, X-QR-Min-Height
  X-QR-Version-Type       normal | micro
  X-QR-Version-Number     1-40 (normal), 1-4 (micro)
  X-QR-EC-Level           L | M | Q | H
  X-QR-Dark-Color, X-QR-Light-Color   hex without '#'
";

pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
pub const JPEG_SOI: [u8; 3] = [0xff, 0xd8, 0xff];
const JPEG_EOI: [u8; 2] = [0xff, 0xd9];

const NUMERIC_HEADERS: [&str; 4] = ["x-qr-width", "x-qr-height", "x-qr-min-width", "x-qr-min-height"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Unicode,
    PlainText,
    Html,
    Svg,
    Png,
    Jpeg,
}

impl Format {
    /// Unknown or missing `Accept` values fall back to unicode.
    pub fn from_accept(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("text/plain") => Format::PlainText,
            Some("text/html") => Format::Html,
            Some("image/svg+xml") => Format::Svg,
            Some("image/png") => Format::Png,
            Some("image/jpeg") => Format::Jpeg,
            _ => Format::Unicode,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Format::Unicode => "application/octet-stream",
            Format::PlainText => "text/plain",
            Format::Html => "text/html",
            Format::Svg => "image/svg+xml",
            Format::Png => "image/png",
            Format::Jpeg => "image/jpeg",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Format::Unicode => "unicode",
            Format::PlainText => "text",
            Format::Html => "html",
            Format::Svg => "svg",
            Format::Png => "png",
            Format::Jpeg => "jpeg",
        }
    }
}

/// What a request asked for, after header validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub format: Format,
    /// Received `x-qr-*` headers, lowercased and sorted by name.
    pub params: Vec<(String, String)>,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(help).post(generate_from_body))
        .route("/{*text}", get(generate_from_path).post(reject_post_with_path))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// First comma- and semicolon-separated token of a header, as the service
/// reads it.
fn first_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.split(';').next())
        .map(|s| s.trim().to_string())
}

fn bad_request(reason: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "text/plain")],
        format!("Bad Request: {reason}\n"),
    )
        .into_response()
}

pub fn read_rendering(headers: &HeaderMap) -> Result<Rendering, Response> {
    let format = Format::from_accept(first_value(headers, "accept").as_deref());

    for name in NUMERIC_HEADERS {
        if let Some(value) = first_value(headers, name) {
            value
                .parse::<u32>()
                .map_err(|_| bad_request(&format!("invalid {name}")))?;
        }
    }

    // The service defaults to micro symbols.
    let micro = !matches!(
        first_value(headers, "x-qr-version-type").as_deref(),
        Some("n" | "normal")
    );

    if let Some(value) = first_value(headers, "x-qr-version-number") {
        let number = value
            .parse::<i16>()
            .map_err(|_| bad_request("invalid x-qr-version-number"))?;
        let max = if micro { 4 } else { 40 };
        if !(1..=max).contains(&number) {
            return Err(bad_request("version number out of range"));
        }
    }

    if let Some(value) = first_value(headers, "x-qr-ec-level") {
        if !matches!(value.as_str(), "L" | "M" | "Q" | "H") {
            return Err(bad_request("invalid x-qr-ec-level"));
        }
    }

    let mut params: Vec<(String, String)> = headers
        .keys()
        .filter(|name| name.as_str().starts_with("x-qr-"))
        .filter_map(|name| first_value(headers, name.as_str()).map(|v| (name.as_str().to_string(), v)))
        .collect();
    params.sort();

    Ok(Rendering { format, params })
}

/// Deterministic body for `payload` in the requested format.
pub fn render(payload: &[u8], rendering: &Rendering) -> Vec<u8> {
    let mut description = format!(
        "qrcode.show mock\nformat: {}\ndata: {}\n",
        rendering.format.name(),
        String::from_utf8_lossy(payload)
    );
    for (name, value) in &rendering.params {
        description.push_str(&format!("{name}: {value}\n"));
    }

    match rendering.format {
        Format::Unicode | Format::PlainText => description.into_bytes(),
        Format::Html => format!("<html><body><pre>{description}</pre></body></html>\n").into_bytes(),
        Format::Svg => {
            format!("<svg xmlns=\"http://www.w3.org/2000/svg\"><desc>{description}</desc></svg>\n").into_bytes()
        }
        Format::Png => [&PNG_SIGNATURE[..], payload].concat(),
        Format::Jpeg => [&JPEG_SOI[..], payload, &JPEG_EOI[..]].concat(),
    }
}

fn respond(payload: &[u8], rendering: &Rendering) -> Response {
    (
        [(header::CONTENT_TYPE, rendering.format.content_type())],
        render(payload, rendering),
    )
        .into_response()
}

async fn help(headers: HeaderMap) -> Response {
    let rendering = match read_rendering(&headers) {
        Ok(r) => r,
        Err(rejection) => return rejection,
    };
    match rendering.format {
        Format::Html => (
            [(header::CONTENT_TYPE, "text/html")],
            format!("<html><body><pre>{HELP}</pre></body></html>\n"),
        )
            .into_response(),
        Format::Unicode | Format::PlainText => ([(header::CONTENT_TYPE, "text/plain")], HELP).into_response(),
        Format::Svg | Format::Png | Format::Jpeg => bad_request("nothing to render"),
    }
}

async fn generate_from_path(OriginalUri(uri): OriginalUri, headers: HeaderMap) -> Response {
    let rendering = match read_rendering(&headers) {
        Ok(r) => r,
        Err(rejection) => return rejection,
    };
    // The path is used raw, without percent-decoding.
    let path = uri.path().strip_prefix('/').unwrap_or(uri.path());
    let input = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    tracing::debug!(input = %input, format = ?rendering.format, "GET render");
    respond(input.as_bytes(), &rendering)
}

async fn generate_from_body(headers: HeaderMap, body: Bytes) -> Response {
    let rendering = match read_rendering(&headers) {
        Ok(r) => r,
        Err(rejection) => return rejection,
    };
    if body.is_empty() {
        return bad_request("empty body");
    }
    tracing::debug!(bytes = body.len(), format = ?rendering.format, "POST render");
    respond(&body, &rendering)
}

async fn reject_post_with_path() -> Response {
    bad_request("POST only accepts /")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn accept_falls_back_to_unicode() {
        assert_eq!(Format::from_accept(None), Format::Unicode);
        assert_eq!(Format::from_accept(Some("*/*")), Format::Unicode);
        assert_eq!(Format::from_accept(Some("IMAGE/PNG")), Format::Png);
    }

    #[test]
    fn first_value_splits_lists_and_params() {
        let map = headers(&[("accept", "image/png;q=0.9, text/html")]);
        assert_eq!(first_value(&map, "accept").as_deref(), Some("image/png"));
    }

    #[test]
    fn rendering_collects_sorted_params() {
        let map = headers(&[("x-qr-width", "50"), ("x-qr-height", "40"), ("accept", "text/plain")]);
        let rendering = read_rendering(&map).unwrap();
        assert_eq!(rendering.format, Format::PlainText);
        assert_eq!(
            rendering.params,
            vec![
                ("x-qr-height".to_string(), "40".to_string()),
                ("x-qr-width".to_string(), "50".to_string()),
            ]
        );
    }

    #[test]
    fn non_numeric_width_is_rejected() {
        let map = headers(&[("x-qr-min-width", "wide")]);
        let rejection = read_rendering(&map).unwrap_err();
        assert_eq!(rejection.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn version_number_defaults_to_micro() {
        assert!(read_rendering(&headers(&[("x-qr-version-number", "4")])).is_ok());
        assert!(read_rendering(&headers(&[("x-qr-version-number", "5")])).is_err());
        assert!(read_rendering(&headers(&[
            ("x-qr-version-number", "5"),
            ("x-qr-version-type", "normal"),
        ]))
        .is_ok());
    }

    #[test]
    fn lowercase_ec_level_is_rejected() {
        assert!(read_rendering(&headers(&[("x-qr-ec-level", "h")])).is_err());
        assert!(read_rendering(&headers(&[("x-qr-ec-level", "H")])).is_ok());
    }

    #[test]
    fn png_rendering_starts_with_signature() {
        let rendering = Rendering {
            format: Format::Png,
            params: Vec::new(),
        };
        let body = render(b"abc", &rendering);
        assert_eq!(&body[..8], &PNG_SIGNATURE);
        assert_eq!(&body[8..], b"abc");
    }

    #[test]
    fn text_rendering_describes_request() {
        let rendering = Rendering {
            format: Format::Unicode,
            params: vec![("x-qr-version-type".to_string(), "micro".to_string())],
        };
        let body = String::from_utf8(render(b"hi", &rendering)).unwrap();
        assert!(body.contains("data: hi\n"));
        assert!(body.contains("x-qr-version-type: micro\n"));
    }
}
