//! Executes core `HttpRequest` values over the network with ureq.
//!
//! The agent is built with `http_status_as_error(false)` so 4xx/5xx
//! responses come back as data and the core decides what they mean. Only
//! failures that produce no response at all become `Error::Transport`.

use std::time::Duration;

use qrshow_core::{HttpMethod, HttpRequest, HttpResponse};
use tracing::debug;

use crate::error::Result;

const USER_AGENT: &str = concat!("qrshow/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport {
    /// `timeout` bounds each whole request; `None` keeps ureq's default.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: &HttpRequest) -> Result<HttpResponse> {
        debug!(method = %req.method, url = %req.url, headers = req.headers.len(), "sending request");

        let mut response = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.url).header("user-agent", USER_AGENT);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()?
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&req.url).header("user-agent", USER_AGENT);
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &req.body {
                    Some(body) => builder.send(body.as_bytes())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;

        debug!(status, bytes = body.len(), "received response");
        Ok(HttpResponse { status, headers, body })
    }
}
