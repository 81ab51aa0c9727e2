//! `dtb check`: parse a dataset and report integrity problems.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::warn;

use dtb_core::{EntityKind, TerritorialData};

use crate::commands::{load_data, resolve_input};
use crate::config::DtbConfig;

/// Print per-table row counts and fail if any reference is broken.
pub fn run(config: Option<&(DtbConfig, PathBuf)>, input: Option<&Path>) -> Result<()> {
    let input = resolve_input(input, config)?;
    let name = config
        .map(|(c, _)| c.dataset.name.clone())
        .unwrap_or_else(|| dtb_encode::DEFAULT_DATASET_NAME.to_string());
    let data = load_data(&input, &name)?;

    print!("{}", summary(&data));
    verify(&data)
}

/// Row counts per table.
pub fn summary(data: &TerritorialData) -> String {
    let mut out = format!("{}\n", data.name());
    for kind in EntityKind::ALL {
        out.push_str(&format!("  {:<14} {:>7}\n", kind.table_name(), data.len(kind)));
    }
    out.push_str(&format!("  {:<14} {:>7}\n", "total", data.total_rows()));
    out
}

/// Log every problem, then fail with the count.
pub fn verify(data: &TerritorialData) -> Result<()> {
    let problems = data.check_integrity();
    for problem in &problems {
        warn!("{problem}");
    }
    match problems.len() {
        0 => {
            println!("No integrity problems found.");
            Ok(())
        }
        1 => bail!("1 integrity problem found"),
        n => bail!("{n} integrity problems found"),
    }
}
