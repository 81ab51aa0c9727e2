//! Comma-separated values, quoted per RFC 4180.

use dtb_core::TerritorialData;

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::Result;
use crate::format::FormatInfo;
use crate::tabular;

static FORMAT: FormatInfo = FormatInfo {
    name: "csv",
    friendly_name: "CSV",
    extension: ".csv",
    category: "Tabular Text",
    mime_types: &["text/csv"],
    info_url: "https://en.wikipedia.org/wiki/Comma-separated_values",
    binary: false,
};

/// CSV encoder. Lines end in CRLF; minification has no effect.
pub struct CsvEncoder;

impl Encoder for CsvEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, _ctx: &EncodeContext<'_>) -> Result<Encoded> {
        Ok(Encoded::Text(tabular::write_sections(data, ',', "\r\n", quote)))
    }
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
