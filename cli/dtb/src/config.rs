//! `dtb.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dtb_encode::DEFAULT_DATASET_NAME;

/// Configuration file name, searched from the working directory upward.
pub const CONFIG_FILE: &str = "dtb.toml";

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DtbConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Dataset section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Human-readable dataset name, used as the XML root name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Default input file, relative to the directory holding `dtb.toml`.
    #[serde(default)]
    pub input: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            input: None,
        }
    }
}

fn default_name() -> String {
    DEFAULT_DATASET_NAME.to_string()
}

/// Export defaults. Command-line flags take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub minified: bool,
    /// File path, or `auto`.
    #[serde(default)]
    pub output: Option<String>,
}

impl DtbConfig {
    /// Search upward from `start_dir` for a `dtb.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: DtbConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Configured input file, resolved against `config_dir`.
    pub fn input_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.dataset.input.as_ref().map(|p| config_dir.join(p))
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing dtb.toml")
    }
}
