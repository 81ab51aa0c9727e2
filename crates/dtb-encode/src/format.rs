//! Format metadata exposed by every encoder.

use serde::Serialize;

/// Immutable description of an output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    /// Canonical lookup name.
    pub name: &'static str,
    /// Human-friendly name.
    pub friendly_name: &'static str,
    /// File extension, with the leading dot.
    pub extension: &'static str,
    /// Logical category, e.g. "Data Interchange".
    pub category: &'static str,
    /// Media types, preferred first.
    pub mime_types: &'static [&'static str],
    /// Reference URL.
    pub info_url: &'static str,
    /// Whether output is raw bytes rather than UTF-8 text.
    pub binary: bool,
}

impl FormatInfo {
    /// Preferred media type.
    pub fn mime_type(&self) -> &'static str {
        self.mime_types.first().copied().unwrap_or("application/octet-stream")
    }

    /// File name used when the caller asks for an automatic one.
    pub fn default_filename(&self) -> String {
        format!("dtb{}", self.extension)
    }
}
