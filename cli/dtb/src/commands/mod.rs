//! CLI command implementations.

pub mod check;
pub mod export;
pub mod formats;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use dtb_core::{JsonParser, TerritorialData};

use crate::config::DtbConfig;

/// Resolve the input file: `--input` first, then `[dataset] input`.
pub fn resolve_input(
    input: Option<&Path>,
    config: Option<&(DtbConfig, PathBuf)>,
) -> Result<PathBuf> {
    if let Some(path) = input {
        return Ok(path.to_path_buf());
    }
    match config.and_then(|(config, dir)| config.input_path(dir)) {
        Some(path) => Ok(path),
        None => bail!("no input file given (use --input or set [dataset] input in dtb.toml)"),
    }
}

/// Read and parse a JSON dataset file.
pub fn load_data(path: &Path, name: &str) -> Result<TerritorialData> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut data = TerritorialData::new(name);
    data.load(raw);
    data.parse(&JsonParser)
        .with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), rows = data.total_rows(), "loaded dataset");
    Ok(data)
}
