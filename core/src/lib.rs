//! Synchronous API client core for the qrcode.show service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `QrClient` is stateless. It holds only `base_url`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Rendering knobs live in `QrOptions` and map one-to-one onto the
//!   service's `X-QR-*` and `Accept` headers.
//! - Whether a body is text or image data follows from the requested
//!   `Format`, because the service labels its default unicode rendering
//!   `application/octet-stream`.

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod types;

pub use client::{encode_path, QrClient, QrOutput, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::QrOptions;
pub use types::{EcLevel, Format, HexColor, VersionType};
