//! Rendering options and their header encoding.
//!
//! # Design
//! Every field is optional and an absent field sends no header, leaving the
//! choice to the service. Headers come out in a fixed order so that two
//! requests built from equal options are byte-identical.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{EcLevel, Format, HexColor, VersionType};

pub const HEADER_WIDTH: &str = "X-QR-Width";
pub const HEADER_HEIGHT: &str = "X-QR-Height";
pub const HEADER_MIN_WIDTH: &str = "X-QR-Min-Width";
pub const HEADER_MIN_HEIGHT: &str = "X-QR-Min-Height";
pub const HEADER_VERSION_TYPE: &str = "X-QR-Version-Type";
pub const HEADER_VERSION_NUMBER: &str = "X-QR-Version-Number";
pub const HEADER_EC_LEVEL: &str = "X-QR-EC-Level";
pub const HEADER_DARK_COLOR: &str = "X-QR-Dark-Color";
pub const HEADER_LIGHT_COLOR: &str = "X-QR-Light-Color";
pub const HEADER_ACCEPT: &str = "Accept";

/// Optional rendering knobs sent to the service as request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QrOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub version_type: Option<VersionType>,
    pub version_number: Option<i16>,
    pub ec_level: Option<EcLevel>,
    pub dark_color: Option<HexColor>,
    pub light_color: Option<HexColor>,
    pub format: Option<Format>,
}

impl QrOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both `X-QR-Width` and `X-QR-Height`.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn min_size(mut self, min_width: u32, min_height: u32) -> Self {
        self.min_width = Some(min_width);
        self.min_height = Some(min_height);
        self
    }

    pub fn version_type(mut self, version_type: VersionType) -> Self {
        self.version_type = Some(version_type);
        self
    }

    pub fn version_number(mut self, number: i16) -> Self {
        self.version_number = Some(number);
        self
    }

    pub fn ec_level(mut self, level: EcLevel) -> Self {
        self.ec_level = Some(level);
        self
    }

    pub fn colors(mut self, dark: HexColor, light: HexColor) -> Self {
        self.dark_color = Some(dark);
        self.light_color = Some(light);
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Format the response will be in; the service default when unset.
    pub fn effective_format(&self) -> Format {
        self.format.unwrap_or_default()
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merged_with(&self, overrides: &QrOptions) -> QrOptions {
        QrOptions {
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            min_width: overrides.min_width.or(self.min_width),
            min_height: overrides.min_height.or(self.min_height),
            version_type: overrides.version_type.or(self.version_type),
            version_number: overrides.version_number.or(self.version_number),
            ec_level: overrides.ec_level.or(self.ec_level),
            dark_color: overrides.dark_color.clone().or_else(|| self.dark_color.clone()),
            light_color: overrides.light_color.clone().or_else(|| self.light_color.clone()),
            format: overrides.format.or(self.format),
        }
    }

    /// Reject values the service would answer with 400.
    ///
    /// The service treats a version number without a version type as a
    /// micro version, so the range check does too.
    pub fn validate(&self) -> Result<(), ApiError> {
        let sizes = [
            (HEADER_WIDTH, self.width),
            (HEADER_HEIGHT, self.height),
            (HEADER_MIN_WIDTH, self.min_width),
            (HEADER_MIN_HEIGHT, self.min_height),
        ];
        for (name, value) in sizes {
            if value == Some(0) {
                return Err(ApiError::InvalidOption(format!("{name} must be greater than zero")));
            }
        }

        if let Some(number) = self.version_number {
            let version_type = self.version_type.unwrap_or(VersionType::Micro);
            let max = version_type.max_version();
            if !(1..=max).contains(&number) {
                return Err(ApiError::InvalidOption(format!(
                    "version number {number} is out of range for {version_type} symbols (1..={max})"
                )));
            }
        }

        Ok(())
    }

    /// Validated header list in a fixed order.
    pub fn headers(&self) -> Result<Vec<(String, String)>, ApiError> {
        self.validate()?;

        let mut headers = Vec::new();
        let mut push = |name: &str, value: String| headers.push((name.to_string(), value));

        if let Some(v) = self.width {
            push(HEADER_WIDTH, v.to_string());
        }
        if let Some(v) = self.height {
            push(HEADER_HEIGHT, v.to_string());
        }
        if let Some(v) = self.min_width {
            push(HEADER_MIN_WIDTH, v.to_string());
        }
        if let Some(v) = self.min_height {
            push(HEADER_MIN_HEIGHT, v.to_string());
        }
        if let Some(v) = self.version_type {
            push(HEADER_VERSION_TYPE, v.header_value().to_string());
        }
        if let Some(v) = self.version_number {
            push(HEADER_VERSION_NUMBER, v.to_string());
        }
        if let Some(v) = self.ec_level {
            push(HEADER_EC_LEVEL, v.header_value().to_string());
        }
        if let Some(v) = &self.dark_color {
            push(HEADER_DARK_COLOR, v.to_string());
        }
        if let Some(v) = &self.light_color {
            push(HEADER_LIGHT_COLOR, v.to_string());
        }
        if let Some(accept) = self.format.and_then(|f| f.accept()) {
            push(HEADER_ACCEPT, accept.to_string());
        }

        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(headers: &[(String, String)]) -> Vec<(&str, &str)> {
        headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn empty_options_send_no_headers() {
        assert!(QrOptions::new().headers().unwrap().is_empty());
    }

    #[test]
    fn size_headers_are_exact_strings() {
        let headers = QrOptions::new().size(50, 50).headers().unwrap();
        assert_eq!(pairs(&headers), vec![("X-QR-Width", "50"), ("X-QR-Height", "50")]);
    }

    #[test]
    fn micro_version_header() {
        let headers = QrOptions::new().version_type(VersionType::Micro).headers().unwrap();
        assert_eq!(pairs(&headers), vec![("X-QR-Version-Type", "micro")]);
    }

    #[test]
    fn all_headers_in_fixed_order() {
        let opts = QrOptions::new()
            .format(Format::Png)
            .colors("#000".parse().unwrap(), "fff".parse().unwrap())
            .ec_level(EcLevel::H)
            .version_number(10)
            .version_type(VersionType::Normal)
            .min_size(200, 100)
            .size(300, 300);
        let headers = opts.headers().unwrap();
        assert_eq!(
            pairs(&headers),
            vec![
                ("X-QR-Width", "300"),
                ("X-QR-Height", "300"),
                ("X-QR-Min-Width", "200"),
                ("X-QR-Min-Height", "100"),
                ("X-QR-Version-Type", "normal"),
                ("X-QR-Version-Number", "10"),
                ("X-QR-EC-Level", "H"),
                ("X-QR-Dark-Color", "000"),
                ("X-QR-Light-Color", "fff"),
                ("Accept", "image/png"),
            ]
        );
    }

    #[test]
    fn unicode_format_sends_no_accept() {
        let headers = QrOptions::new().format(Format::Unicode).headers().unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = QrOptions::new().size(0, 10).headers().unwrap_err();
        assert!(matches!(err, ApiError::InvalidOption(msg) if msg.contains("X-QR-Width")));
    }

    #[test]
    fn version_number_defaults_to_micro_range() {
        assert!(QrOptions::new().version_number(4).validate().is_ok());
        assert!(QrOptions::new().version_number(5).validate().is_err());
        assert!(QrOptions::new()
            .version_type(VersionType::Normal)
            .version_number(40)
            .validate()
            .is_ok());
        assert!(QrOptions::new()
            .version_type(VersionType::Normal)
            .version_number(41)
            .validate()
            .is_err());
        assert!(QrOptions::new()
            .version_type(VersionType::Normal)
            .version_number(0)
            .validate()
            .is_err());
    }

    #[test]
    fn overrides_win_when_merging() {
        let base = QrOptions::new().size(10, 10).ec_level(EcLevel::L);
        let overrides = QrOptions {
            width: Some(50),
            format: Some(Format::Svg),
            ..QrOptions::default()
        };
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.width, Some(50));
        assert_eq!(merged.height, Some(10));
        assert_eq!(merged.ec_level, Some(EcLevel::L));
        assert_eq!(merged.format, Some(Format::Svg));
    }

    #[test]
    fn deserializes_from_toml_table() {
        let opts: QrOptions = toml::from_str(
            r##"
            width = 50
            height = 50
            version_type = "micro"
            format = "png"
            dark_color = "#112233"
            "##,
        )
        .unwrap();
        assert_eq!(opts.width, Some(50));
        assert_eq!(opts.version_type, Some(VersionType::Micro));
        assert_eq!(opts.effective_format(), Format::Png);
        assert_eq!(opts.dark_color.unwrap().as_str(), "112233");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<QrOptions, _> = toml::from_str("colour = \"fff\"");
        assert!(result.is_err());
    }
}
