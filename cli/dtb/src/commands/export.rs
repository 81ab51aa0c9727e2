//! `dtb export`: convert a dataset to one output format.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use dtb_encode::{export, EncoderRegistry, ExportOptions, OutputTarget};

use crate::commands::{load_data, resolve_input};
use crate::config::DtbConfig;

/// Export the dataset. Flags override `dtb.toml`.
pub fn run(
    config: Option<&(DtbConfig, PathBuf)>,
    input: Option<&Path>,
    format: Option<&str>,
    minify: Option<bool>,
    output: Option<&str>,
) -> Result<()> {
    let defaults = config.map(|(c, _)| c.clone()).unwrap_or_default();

    let Some(format) = format.or(defaults.export.format.as_deref()) else {
        bail!("no output format given (use --format or set [export] format in dtb.toml)");
    };

    let input = resolve_input(input, config)?;
    let data = load_data(&input, &defaults.dataset.name)?;

    let options = ExportOptions {
        minified: minify.unwrap_or(defaults.export.minified),
        output: output
            .or(defaults.export.output.as_deref())
            .map(OutputTarget::parse)
            .unwrap_or_default(),
    };

    let registry = EncoderRegistry::with_defaults();
    let stdout = io::stdout();
    let summary = export(
        &registry,
        &data,
        format,
        &defaults.dataset.name,
        &options,
        &mut stdout.lock(),
    )
    .with_context(|| format!("exporting {}", input.display()))?;

    if let Some(path) = &summary.path {
        println!(
            "Wrote {} ({} bytes, {})",
            path.display(),
            summary.bytes,
            summary.format.friendly_name
        );
    }
    Ok(())
}
