//! The normalized structure: table name → row key → ordered field map.
//!
//! Every encoder consumes this shape. It serializes through `serde` as nested
//! maps with insertion order preserved, so any `serde` data format sees
//! tables in dependency order, rows in load order, and fields in column order.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema::EntityKind;
use crate::value::Value;

/// Transforms applied when building a [`Dataset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToDictOptions {
    /// Stringify row keys.
    pub string_keys: bool,
    /// Coerce every field value to text.
    pub force_text: bool,
    /// Keep the primary-key field inside each row's field map.
    pub include_key: bool,
}

/// Key of a row inside its table map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(n) => write!(f, "{n}"),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for RowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowKey::Int(n) => serializer.serialize_i64(*n),
            RowKey::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// One row: its key and ordered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowData {
    key: RowKey,
    fields: Vec<(&'static str, Value)>,
}

impl RowData {
    pub fn new(key: RowKey, fields: Vec<(&'static str, Value)>) -> Self {
        Self { key, fields }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn fields(&self) -> &[(&'static str, Value)] {
        &self.fields
    }

    /// Look up a field by column name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }
}

impl Serialize for RowData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// One table's rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    kind: EntityKind,
    columns: Vec<&'static str>,
    rows: Vec<RowData>,
}

impl TableData {
    pub fn new(kind: EntityKind, columns: Vec<&'static str>, rows: Vec<RowData>) -> Self {
        Self {
            kind,
            columns,
            rows,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.table_name()
    }

    /// Column names present in every row, in order.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn rows(&self) -> &[RowData] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Serialize for TableData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for row in &self.rows {
            map.serialize_entry(&row.key, row)?;
        }
        map.end()
    }
}

/// The normalized structure handed to encoders.
///
/// Tables with zero rows are never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    tables: Vec<TableData>,
}

impl Dataset {
    pub fn new(tables: Vec<TableData>) -> Self {
        Self {
            tables: tables.into_iter().filter(|t| !t.is_empty()).collect(),
        }
    }

    /// Tables in dependency order.
    pub fn tables(&self) -> &[TableData] {
        &self.tables
    }

    pub fn table(&self, kind: EntityKind) -> Option<&TableData> {
        self.tables.iter().find(|t| t.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(TableData::len).sum()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for table in &self.tables {
            map.serialize_entry(table.name(), table)?;
        }
        map.end()
    }
}
