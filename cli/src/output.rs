//! Printing text renderings and persisting image data.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use qrshow_core::{Format, QrOutput};
use tracing::info;

use crate::error::Result;

/// `qrcode.<ext>` in the working directory.
pub fn default_path(format: Format) -> PathBuf {
    PathBuf::from(format!("qrcode.{}", format.extension()))
}

/// Write `bytes` to `path` verbatim, replacing any existing file and
/// creating missing parent directories.
pub fn write_binary(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(())
}

/// Print text to `stdout` unless a `target` file is given. Image data is
/// never printed; it goes to `target` or to the default path for `format`.
///
/// Returns the file written, if any.
pub fn emit<W: Write>(
    output: &QrOutput,
    format: Format,
    target: Option<&Path>,
    stdout: &mut W,
) -> Result<Option<PathBuf>> {
    match (output, target) {
        (QrOutput::Text(text), None) => {
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
            Ok(None)
        }
        (_, Some(path)) => {
            write_binary(path, output.as_bytes())?;
            Ok(Some(path.to_path_buf()))
        }
        (QrOutput::Binary { .. }, None) => {
            let path = default_path(format);
            write_binary(&path, output.as_bytes())?;
            Ok(Some(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_uses_format_extension() {
        assert_eq!(default_path(Format::Png), PathBuf::from("qrcode.png"));
        assert_eq!(default_path(Format::Jpeg), PathBuf::from("qrcode.jpg"));
        assert_eq!(default_path(Format::Svg), PathBuf::from("qrcode.svg"));
    }

    #[test]
    fn write_binary_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("qrcode.png");
        let bytes = [0x89, b'P', b'N', b'G', 0x00, 0xff, 0x0a, 0x0d];

        write_binary(&path, &bytes).unwrap();
        assert_eq!(fs::read(&path).unwrap(), bytes);

        write_binary(&path, b"short").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn text_goes_to_stdout() {
        let mut out = Vec::new();
        let written = emit(&QrOutput::Text("██\n".to_string()), Format::Unicode, None, &mut out).unwrap();
        assert!(written.is_none());
        assert_eq!(out, "██\n".as_bytes());
    }

    #[test]
    fn text_without_newline_gets_one() {
        let mut out = Vec::new();
        emit(&QrOutput::Text("<svg/>".to_string()), Format::Svg, None, &mut out).unwrap();
        assert_eq!(out, b"<svg/>\n");
    }

    #[test]
    fn binary_goes_to_target_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        let output = QrOutput::Binary {
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let mut out = Vec::new();

        let written = emit(&output, Format::Png, Some(&path), &mut out).unwrap();
        assert_eq!(written.as_deref(), Some(path.as_path()));
        assert!(out.is_empty());
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn text_can_be_saved_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qr.svg");
        let mut out = Vec::new();

        emit(&QrOutput::Text("<svg/>".to_string()), Format::Svg, Some(&path), &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }
}
