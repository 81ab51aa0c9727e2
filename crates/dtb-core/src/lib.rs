//! Territorial division data model.
//!
//! Holds the six-level hierarchy of Brazilian territorial divisions
//! (state → mesoregion → microregion → municipality → district → subdistrict)
//! in memory and flattens it into the normalized structure every encoder
//! consumes.
//!
//! ## Modules
//!
//! - [`schema`]: Entity kinds, columns, and foreign-key edges
//! - [`division`]: Rows and schema-aware row views
//! - [`value`]: Field values ([`Value`])
//! - [`tree`]: The [`TerritorialData`] container
//! - [`dict`]: The normalized table → row → field structure
//! - [`serialize`]: Encoder-facing [`Serializer`]
//! - [`integrity`]: Orphaned and contradictory reference detection
//! - [`parse`]: Parser seam for raw source bytes
//! - [`text`]: List formatting helpers
//! - [`error`]: [`DataError`] and the crate [`Result`] alias

pub mod dict;
pub mod division;
pub mod error;
pub mod integrity;
pub mod parse;
pub mod schema;
pub mod serialize;
pub mod text;
pub mod tree;
pub mod value;

pub use dict::{Dataset, RowData, RowKey, TableData, ToDictOptions};
pub use division::{Division, Entity};
pub use error::{DataError, Result};
pub use parse::{DatasetParser, JsonParser, ParsedRows};
pub use schema::{Column, ColumnRole, ColumnType, EntityKind};
pub use serialize::Serializer;
pub use tree::TerritorialData;
pub use value::Value;
