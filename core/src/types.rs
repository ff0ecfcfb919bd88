//! Value types for the service's rendering knobs.
//!
//! Each type parses from the spelling a user would type on a command line or
//! in a config file and renders to the exact header value the service reads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Output format, selected with the `Accept` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Format {
    /// Unicode half-block rendering. The service's default, so no `Accept`
    /// header is sent for it.
    #[default]
    Unicode,
    PlainText,
    Html,
    Svg,
    Png,
    Jpeg,
}

impl Format {
    /// Value for the `Accept` header, `None` for the service default.
    pub fn accept(&self) -> Option<&'static str> {
        match self {
            Format::Unicode => None,
            Format::PlainText => Some("text/plain"),
            Format::Html => Some("text/html"),
            Format::Svg => Some("image/svg+xml"),
            Format::Png => Some("image/png"),
            Format::Jpeg => Some("image/jpeg"),
        }
    }

    /// PNG and JPEG bodies are image data; everything else is text.
    pub fn is_binary(&self) -> bool {
        matches!(self, Format::Png | Format::Jpeg)
    }

    /// File extension used when saving output without an explicit path.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Unicode | Format::PlainText => "txt",
            Format::Html => "html",
            Format::Svg => "svg",
            Format::Png => "png",
            Format::Jpeg => "jpg",
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

impl FromStr for Format {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unicode" => Ok(Format::Unicode),
            "text" | "plain" | "text/plain" => Ok(Format::PlainText),
            "html" | "text/html" => Ok(Format::Html),
            "svg" | "image/svg+xml" => Ok(Format::Svg),
            "png" | "image/png" => Ok(Format::Png),
            "jpg" | "jpeg" | "image/jpeg" => Ok(Format::Jpeg),
            other => Err(ApiError::InvalidOption(format!("unknown format '{other}'"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Format {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Format> for String {
    fn from(value: Format) -> Self {
        value.to_string()
    }
}

/// QR symbol family, sent as `X-QR-Version-Type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VersionType {
    Normal,
    Micro,
}

impl VersionType {
    pub fn header_value(&self) -> &'static str {
        match self {
            VersionType::Normal => "normal",
            VersionType::Micro => "micro",
        }
    }

    /// Largest version number the family defines.
    pub fn max_version(&self) -> i16 {
        match self {
            VersionType::Normal => 40,
            VersionType::Micro => 4,
        }
    }
}

impl FromStr for VersionType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "normal" => Ok(VersionType::Normal),
            "m" | "micro" => Ok(VersionType::Micro),
            other => Err(ApiError::InvalidOption(format!(
                "unknown version type '{other}', expected 'normal' or 'micro'"
            ))),
        }
    }
}

impl fmt::Display for VersionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}

impl TryFrom<String> for VersionType {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionType> for String {
    fn from(value: VersionType) -> Self {
        value.to_string()
    }
}

/// Error correction level, sent as `X-QR-EC-Level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EcLevel {
    L,
    M,
    Q,
    H,
}

impl EcLevel {
    pub fn header_value(&self) -> &'static str {
        match self {
            EcLevel::L => "L",
            EcLevel::M => "M",
            EcLevel::Q => "Q",
            EcLevel::H => "H",
        }
    }
}

impl FromStr for EcLevel {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(ApiError::InvalidOption(format!(
                "unknown error correction level '{other}', expected one of L, M, Q, H"
            ))),
        }
    }
}

impl fmt::Display for EcLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_value())
    }
}

impl TryFrom<String> for EcLevel {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EcLevel> for String {
    fn from(value: EcLevel) -> Self {
        value.to_string()
    }
}

/// A hex color such as `ff0000`. The service prepends `#` itself, so the
/// stored value never carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        let valid_len = matches!(digits.len(), 3 | 4 | 6 | 8);
        if !valid_len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ApiError::InvalidOption(format!(
                "invalid color '{s}', expected 3, 4, 6 or 8 hex digits"
            )));
        }
        Ok(HexColor(digits.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ApiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}
