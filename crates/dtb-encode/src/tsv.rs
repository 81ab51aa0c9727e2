//! Tab-separated values.

use dtb_core::TerritorialData;

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::Result;
use crate::format::FormatInfo;
use crate::tabular;

static FORMAT: FormatInfo = FormatInfo {
    name: "tsv",
    friendly_name: "TSV",
    extension: ".tsv",
    category: "Tabular Text",
    mime_types: &["text/tab-separated-values"],
    info_url: "https://en.wikipedia.org/wiki/Tab-separated_values",
    binary: false,
};

/// TSV encoder. Minification has no effect.
pub struct TsvEncoder;

impl Encoder for TsvEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, _ctx: &EncodeContext<'_>) -> Result<Encoded> {
        Ok(Encoded::Text(tabular::write_sections(data, '\t', "\n", escape)))
    }
}

/// Escape characters that would break the line/field structure.
fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}
