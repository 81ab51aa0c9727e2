//! Name → encoder lookup.

use dtb_core::text::sentence;

use crate::csv::CsvEncoder;
use crate::encoder::Encoder;
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;
use crate::json::JsonEncoder;
use crate::msgpack::MessagePackEncoder;
use crate::records::RecordsEncoder;
use crate::sql::SqlEncoder;
use crate::tsv::TsvEncoder;
use crate::xml::XmlEncoder;

/// Set of encoders keyed by format name, kept sorted by name.
pub struct EncoderRegistry {
    encoders: Vec<Box<dyn Encoder>>,
}

impl EncoderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            encoders: Vec::new(),
        }
    }

    /// Registry with every built-in encoder.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CsvEncoder));
        registry.register(Box::new(JsonEncoder));
        registry.register(Box::new(MessagePackEncoder));
        registry.register(Box::new(RecordsEncoder));
        registry.register(Box::new(SqlEncoder));
        registry.register(Box::new(TsvEncoder));
        registry.register(Box::new(XmlEncoder));
        registry
    }

    /// Add an encoder, replacing any encoder with the same format name.
    pub fn register(&mut self, encoder: Box<dyn Encoder>) {
        let name = encoder.format().name;
        match self
            .encoders
            .binary_search_by(|e| e.format().name.cmp(name))
        {
            Ok(i) => self.encoders[i] = encoder,
            Err(i) => self.encoders.insert(i, encoder),
        }
    }

    /// Look up an encoder by format name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Result<&dyn Encoder> {
        let wanted = name.trim().to_ascii_lowercase();
        self.encoders
            .iter()
            .find(|e| e.format().name == wanted)
            .map(|e| e.as_ref())
            .ok_or_else(|| EncodeError::UnsupportedFormat {
                name: name.to_string(),
                available: sentence(&self.names(), ", ", Some(" and ")),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    /// Metadata of every registered format, sorted by name.
    pub fn formats(&self) -> Vec<&'static FormatInfo> {
        self.encoders.iter().map(|e| e.format()).collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.encoders.iter().map(|e| e.format().name).collect()
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{EncodeContext, Encoded};
    use dtb_core::TerritorialData;

    #[test]
    fn defaults_are_sorted() {
        let registry = EncoderRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec!["csv", "json", "msgpack", "records", "sql", "tsv", "xml"]
        );
    }

    #[test]
    fn lookup_ignores_case() {
        let registry = EncoderRegistry::with_defaults();
        assert_eq!(registry.get("XML").unwrap().format().name, "xml");
        assert!(registry.contains(" tsv "));
    }

    #[test]
    fn unknown_format_lists_available() {
        let registry = EncoderRegistry::with_defaults();
        let err = registry.get("fictional-format").err().unwrap();
        match err {
            EncodeError::UnsupportedFormat { name, available } => {
                assert_eq!(name, "fictional-format");
                assert_eq!(available, "csv, json, msgpack, records, sql, tsv and xml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    static STUB: FormatInfo = FormatInfo {
        name: "xml",
        friendly_name: "Stub",
        extension: ".stub",
        category: "Test",
        mime_types: &[],
        info_url: "",
        binary: false,
    };

    struct Stub;

    impl Encoder for Stub {
        fn format(&self) -> &'static FormatInfo {
            &STUB
        }

        fn encode(&self, _data: &TerritorialData, _ctx: &EncodeContext<'_>) -> Result<Encoded> {
            Ok(Encoded::Text("stub".into()))
        }
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = EncoderRegistry::with_defaults();
        let before = registry.len();
        registry.register(Box::new(Stub));
        assert_eq!(registry.len(), before);
        assert_eq!(registry.get("xml").unwrap().format().friendly_name, "Stub");
    }

    #[test]
    fn empty_registry() {
        let registry = EncoderRegistry::new();
        assert!(registry.is_empty());
        let err = registry.get("xml").err().unwrap();
        assert!(matches!(err, EncodeError::UnsupportedFormat { ref available, .. } if available.is_empty()));
    }
}
