//! qrshow entrypoint

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use qrshow::{logging, output, Error, QrshowConfig, Result, Session, DEMO_TEXT};
use qrshow_core::{EcLevel, Format, HexColor, QrOptions, QrOutput, VersionType};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "qrshow", version, about = "Generate QR codes with the qrcode.show service")]
struct Cli {
    /// Configuration file (toml). Defaults to ./qrshow.toml or $XDG_CONFIG_HOME/qrshow/config.toml
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Service root URL (takes precedence over config file)
    #[arg(long, value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Whole-request timeout in seconds, 0 to disable
    #[arg(long, value_name = "SECS", global = true)]
    timeout: Option<u64>,

    /// Log filter, e.g. `info` or `qrshow=debug`
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render TEXT sent in the URL path
    Get {
        text: String,
        #[command(flatten)]
        render: RenderArgs,
        /// Save the result here instead of printing it
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Render a plain-text body: TEXT, --file, or stdin
    Post {
        #[arg(conflicts_with = "file")]
        text: Option<String>,
        /// Read the body from this file
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
        /// Save the result here instead of printing it
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print the service's usage text
    Usage {
        /// Fetch the HTML landing page instead
        #[arg(long)]
        html: bool,
    },
    /// Plain, 50x50 and micro renderings of TEXT, then save a PNG of it
    Demo {
        #[arg(default_value = DEMO_TEXT)]
        text: String,
        /// Where to save the PNG
        #[arg(long, value_name = "PATH", default_value = "qrcode.png")]
        image: PathBuf,
    },
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// X-QR-Width
    #[arg(long)]
    width: Option<u32>,
    /// X-QR-Height
    #[arg(long)]
    height: Option<u32>,
    /// X-QR-Min-Width
    #[arg(long)]
    min_width: Option<u32>,
    /// X-QR-Min-Height
    #[arg(long)]
    min_height: Option<u32>,
    /// `normal` or `micro`
    #[arg(long)]
    version_type: Option<VersionType>,
    /// 1-40 for normal symbols, 1-4 for micro
    #[arg(long)]
    version_number: Option<i16>,
    /// Error correction level: L, M, Q or H
    #[arg(long)]
    ec_level: Option<EcLevel>,
    /// Hex color of dark modules
    #[arg(long)]
    dark_color: Option<HexColor>,
    /// Hex color of light modules
    #[arg(long)]
    light_color: Option<HexColor>,
    /// unicode, text, html, svg, png or jpeg (MIME types work too)
    #[arg(long, short)]
    format: Option<Format>,
}

impl From<RenderArgs> for QrOptions {
    fn from(args: RenderArgs) -> Self {
        QrOptions {
            width: args.width,
            height: args.height,
            min_width: args.min_width,
            min_height: args.min_height,
            version_type: args.version_type,
            version_number: args.version_number,
            ec_level: args.ec_level,
            dark_color: args.dark_color,
            light_color: args.light_color,
            format: args.format,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(status = ?response_status(&e), "request failed");
            eprintln!("{}", e.failure_message());
            ExitCode::FAILURE
        }
    }
}

fn response_status(e: &Error) -> Option<u16> {
    match e {
        Error::Api(api) => api.status(),
        _ => None,
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = QrshowConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    logging::init(&config.logging)?;
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let session = Session::from_config(&config);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Get { text, render, output } => {
            let overrides = QrOptions::from(render);
            let format = config.defaults.merged_with(&overrides).effective_format();
            let result = session.get(&text, &overrides)?;
            report_saved(output::emit(&result, format, output.as_deref(), &mut stdout)?);
        }
        Command::Post {
            text,
            file,
            render,
            output,
        } => {
            let body = read_body(text, file.as_deref())?;
            let overrides = QrOptions::from(render);
            let format = config.defaults.merged_with(&overrides).effective_format();
            let result = session.post(&body, &overrides)?;
            report_saved(output::emit(&result, format, output.as_deref(), &mut stdout)?);
        }
        Command::Usage { html } => {
            let format = if html { Format::Html } else { Format::PlainText };
            let text = session.usage(format)?;
            output::emit(&QrOutput::Text(text), format, None, &mut stdout)?;
        }
        Command::Demo { text, image } => {
            let report = session.demo(&text, &image, &mut stdout)?;
            report_saved(Some(report.image_path));
        }
    }

    Ok(())
}

fn read_body(text: Option<String>, file: Option<&Path>) -> Result<String> {
    match (text, file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => {
            let mut body = String::new();
            io::stdin().read_to_string(&mut body)?;
            Ok(body)
        }
    }
}

fn report_saved(path: Option<PathBuf>) {
    if let Some(path) = path {
        eprintln!("saved {}", path.display());
    }
}
