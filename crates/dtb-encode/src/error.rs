//! Errors from encoding and exporting.

use thiserror::Error;

/// Convenience alias for results within the encode crate.
pub type Result<T> = std::result::Result<T, EncodeError>;

/// Errors that can occur while encoding or exporting a dataset.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unsupported format '{name}'. Available formats: {available}")]
    UnsupportedFormat { name: String, available: String },

    /// Normalization or packing failed. Any partial output is invalid.
    #[error("failed to encode {format} output{}: {detail}", in_table(.table))]
    EncodeFailure {
        format: &'static str,
        table: Option<&'static str>,
        detail: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EncodeError {
    pub(crate) fn failure(format: &'static str, detail: impl ToString) -> Self {
        EncodeError::EncodeFailure {
            format,
            table: None,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn table_failure(format: &'static str, table: &'static str, detail: impl ToString) -> Self {
        EncodeError::EncodeFailure {
            format,
            table: Some(table),
            detail: detail.to_string(),
        }
    }
}

fn in_table(table: &Option<&'static str>) -> String {
    table.map(|t| format!(" (table {t})")).unwrap_or_default()
}
