//! Parser seam between raw source bytes and the data tree.
//!
//! Spreadsheet and download handling live outside this crate; anything that
//! can turn bytes into rows implements [`DatasetParser`].

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::division::Division;
use crate::error::{DataError, Result};
use crate::schema::EntityKind;

/// Rows grouped by kind, as read from a source.
pub type ParsedRows = Vec<(EntityKind, Vec<Division>)>;

/// Turns raw source bytes into rows.
pub trait DatasetParser {
    /// Short name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Parse `raw` into rows per kind.
    fn parse(&self, raw: &[u8]) -> Result<ParsedRows>;
}

/// Reads a JSON object keyed by table name, each value an array of rows.
///
/// ```json
/// { "uf": [{ "id": 11, "nome": "Rondônia" }],
///   "mesorregiao": [{ "id": 1101, "id_uf": 11, "nome": "Madeira-Guaporé" }] }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl DatasetParser for JsonParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &[u8]) -> Result<ParsedRows> {
        let failure = |detail: String| DataError::ParseFailure {
            parser: self.name().to_string(),
            detail,
        };

        let SourceTables(tables) =
            serde_json::from_slice(raw).map_err(|e| failure(e.to_string()))?;

        let mut parsed = Vec::with_capacity(tables.len());
        for (name, rows) in tables {
            let kind = EntityKind::parse(&name)
                .ok_or_else(|| failure(format!("unknown table '{name}'")))?;
            parsed.push((kind, rows));
        }
        parsed.sort_by_key(|(kind, _)| *kind);
        Ok(parsed)
    }
}

/// Top-level object in source order. A table name may appear once.
struct SourceTables(Vec<(String, Vec<Division>)>);

impl<'de> Deserialize<'de> for SourceTables {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TablesVisitor;

        impl<'de> Visitor<'de> for TablesVisitor {
            type Value = SourceTables;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping table names to arrays of rows")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<SourceTables, A::Error> {
                let mut tables: Vec<(String, Vec<Division>)> = Vec::new();
                while let Some(name) = map.next_key::<String>()? {
                    if tables.iter().any(|(seen, _)| *seen == name) {
                        return Err(de::Error::custom(format_args!("duplicate table '{name}'")));
                    }
                    let rows = map.next_value()?;
                    tables.push((name, rows));
                }
                Ok(SourceTables(tables))
            }
        }

        deserializer.deserialize_map(TablesVisitor)
    }
}
