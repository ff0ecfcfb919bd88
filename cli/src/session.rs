//! One configured client: request building, execution and parsing in a
//! single call per operation.

use std::io::Write;
use std::path::{Path, PathBuf};

use qrshow_core::{encode_path, ApiError, Format, HttpRequest, QrClient, QrOptions, QrOutput, VersionType};
use tracing::{debug, info};

use crate::config::QrshowConfig;
use crate::error::Result;
use crate::output;
use crate::transport::Transport;

/// Text used by `demo` when none is given.
pub const DEMO_TEXT: &str = "this+is+nodejs";

/// Pairs the stateless core client with a transport and default options.
#[derive(Debug, Clone)]
pub struct Session {
    client: QrClient,
    transport: Transport,
    defaults: QrOptions,
}

/// What `demo` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    /// Plain, 50x50 and micro renderings, in that order.
    pub renderings: Vec<String>,
    pub image_path: PathBuf,
    pub image_bytes: usize,
}

impl Session {
    pub fn new(client: QrClient, transport: Transport, defaults: QrOptions) -> Self {
        Self {
            client,
            transport,
            defaults,
        }
    }

    pub fn from_config(config: &QrshowConfig) -> Self {
        Self::new(
            QrClient::new(&config.base_url),
            Transport::new(config.timeout()),
            config.defaults.clone(),
        )
    }

    pub fn client(&self) -> &QrClient {
        &self.client
    }

    /// Render `text` sent in the URL path.
    pub fn get(&self, text: &str, options: &QrOptions) -> Result<QrOutput> {
        let options = self.defaults.merged_with(options);
        let req = self.client.build_get(text, &options)?;
        let path = encode_path(text);
        if path != text {
            debug!(text, %path, "text was percent-encoded for the path");
        }
        self.round_trip(req, options.effective_format())
    }

    /// Render `body` sent as a plain-text POST body.
    pub fn post(&self, body: &str, options: &QrOptions) -> Result<QrOutput> {
        let options = self.defaults.merged_with(options);
        let req = self.client.build_post(body, &options)?;
        self.round_trip(req, options.effective_format())
    }

    /// The service's usage text.
    pub fn usage(&self, format: Format) -> Result<String> {
        let req = self.client.build_help(format)?;
        let response = self.transport.execute(&req)?;
        Ok(self.client.parse_text(response)?)
    }

    fn round_trip(&self, req: HttpRequest, format: Format) -> Result<QrOutput> {
        let response = self.transport.execute(&req)?;
        let output = self.client.parse_output(response, format)?;
        info!(format = %format, bytes = output.as_bytes().len(), "generated QR code");
        Ok(output)
    }

    /// Three GET renderings of `text` (plain, 50x50, micro) printed to
    /// `stdout`, then a PNG of `text` posted as a body and saved to
    /// `image_path`. Stops at the first failure.
    ///
    /// The renderings always ask for unicode so a configured default image
    /// format cannot turn them into bytes.
    pub fn demo<W: Write>(&self, text: &str, image_path: &Path, stdout: &mut W) -> Result<DemoReport> {
        let variants = [
            QrOptions::new().format(Format::Unicode),
            QrOptions::new().size(50, 50).format(Format::Unicode),
            QrOptions::new().version_type(VersionType::Micro).format(Format::Unicode),
        ];

        let mut renderings = Vec::with_capacity(variants.len());
        for options in &variants {
            match self.get(text, options)? {
                QrOutput::Text(rendering) => renderings.push(rendering),
                QrOutput::Binary { content_type, .. } => {
                    return Err(ApiError::UnexpectedContentType {
                        expected: "text".to_string(),
                        actual: content_type,
                    }
                    .into());
                }
            }
        }
        for rendering in &renderings {
            output::emit(&QrOutput::Text(rendering.clone()), Format::Unicode, None, stdout)?;
        }

        let png = QrOptions::new().format(Format::Png);
        let image = self.post(text, &png)?;
        output::write_binary(image_path, image.as_bytes())?;

        Ok(DemoReport {
            renderings,
            image_path: image_path.to_path_buf(),
            image_bytes: image.as_bytes().len(),
        })
    }
}
