//! Export: look up an encoder, encode in memory, then write the result.
//!
//! The format is resolved before any I/O, and file output goes through a
//! temporary file in the destination directory that is renamed into place,
//! so a failed export never leaves a partial file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dtb_core::TerritorialData;

use crate::encoder::{EncodeContext, Encoded};
use crate::error::Result;
use crate::format::FormatInfo;
use crate::registry::EncoderRegistry;

/// Where encoded output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputTarget {
    #[default]
    Stdout,
    /// `dtb` + the format's extension, in the current directory.
    Auto,
    Path(PathBuf),
}

impl OutputTarget {
    /// Parse a command-line value: `auto` picks a file name, `-` means stdout.
    pub fn parse(value: &str) -> Self {
        match value {
            "auto" => OutputTarget::Auto,
            "-" => OutputTarget::Stdout,
            path => OutputTarget::Path(PathBuf::from(path)),
        }
    }

    /// Destination file for `format`, `None` for stdout.
    pub fn resolve(&self, format: &FormatInfo) -> Option<PathBuf> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::Auto => Some(PathBuf::from(format.default_filename())),
            OutputTarget::Path(path) => Some(path.clone()),
        }
    }
}

/// Export options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub minified: bool,
    pub output: OutputTarget,
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: &'static FormatInfo,
    pub bytes: usize,
    /// File written, `None` when output went to the stream.
    pub path: Option<PathBuf>,
}

/// Encode `data` as `format` and write it to `options.output`.
///
/// Stdout output is written to `stdout`, which callers normally pass as
/// `std::io::stdout().lock()`.
pub fn export(
    registry: &EncoderRegistry,
    data: &TerritorialData,
    format: &str,
    dataset_name: &str,
    options: &ExportOptions,
    stdout: &mut dyn Write,
) -> Result<ExportSummary> {
    let encoder = registry.get(format)?;
    let info = encoder.format();

    if options.minified {
        info!("Exporting database to minified {} format...", info.friendly_name);
    } else {
        info!("Exporting database to {} format...", info.friendly_name);
    }

    let ctx = EncodeContext::new(dataset_name).minified(options.minified);
    let encoded = encoder.encode(data, &ctx)?;
    let bytes = encoded.len();

    let path = options.output.resolve(info);
    match &path {
        Some(path) => write_file(path, &encoded)?,
        None => {
            stdout.write_all(encoded.as_bytes())?;
            stdout.flush()?;
        }
    }

    debug!(format = info.name, bytes, path = ?path, "export finished");
    Ok(ExportSummary {
        format: info,
        bytes,
        path,
    })
}

fn write_file(path: &Path, encoded: &Encoded) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode as a plain create; umask still applies.
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(encoded.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
