//! JSON: `{table: {key: {column: value}}}`.

use dtb_core::{Serializer, TerritorialData};

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;

static FORMAT: FormatInfo = FormatInfo {
    name: "json",
    friendly_name: "JSON",
    extension: ".json",
    category: "Data Interchange",
    mime_types: &["application/json"],
    info_url: "https://en.wikipedia.org/wiki/JSON",
    binary: false,
};

pub struct JsonEncoder;

impl Encoder for JsonEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, ctx: &EncodeContext<'_>) -> Result<Encoded> {
        // JSON object keys are strings.
        let dataset = Serializer::new()
            .with_string_keys(true)
            .with_include_key(true)
            .serialize(data);

        let text = if ctx.minified {
            serde_json::to_string(&dataset)
        } else {
            serde_json::to_string_pretty(&dataset).map(|mut s| {
                s.push('\n');
                s
            })
        };

        text.map(Encoded::Text)
            .map_err(|e| EncodeError::failure(FORMAT.name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample;

    #[test]
    fn nested_maps_with_native_values() {
        let out = JsonEncoder.encode(&sample(), &EncodeContext::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(out.as_text().unwrap()).unwrap();
        assert_eq!(json["uf"]["11"]["nome"], "Rondônia");
        assert_eq!(json["uf"]["11"]["id"], 11);
        assert_eq!(json["subdistrito"]["11000150500"]["id_distrito"], 110001505);
    }

    #[test]
    fn minified_has_no_newlines() {
        let ctx = EncodeContext::default().minified(true);
        let out = JsonEncoder.encode(&sample(), &ctx).unwrap();
        assert!(!out.as_text().unwrap().contains('\n'));
        assert!(out.as_text().unwrap().starts_with("{\"uf\":{\"11\":{\"id\":11,\"nome\":\"Rondônia\"}"));
    }
}
