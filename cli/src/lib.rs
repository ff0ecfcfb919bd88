//! Command-line client for qrcode.show.
//!
//! Wraps `qrshow-core` with the pieces the core leaves to its host: a ureq
//! transport, configuration, logging and writing results to the terminal or
//! to disk.

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod session;
pub mod transport;

pub use config::{LoggingOptions, QrshowConfig};
pub use error::{Error, Result};
pub use session::{DemoReport, Session, DEMO_TEXT};
pub use transport::Transport;
