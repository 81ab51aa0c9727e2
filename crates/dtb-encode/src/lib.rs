//! Output encoders for territorial division datasets.
//!
//! Every encoder reads the normalized structure from [`dtb_core::Serializer`]
//! and produces one whole document in memory. [`export`] resolves a format by
//! name and writes the result to a file or stream.
//!
//! | Format    | Output | Module        |
//! |-----------|--------|---------------|
//! | `csv`     | text   | [`csv`]       |
//! | `json`    | text   | [`json`]      |
//! | `msgpack` | binary | [`msgpack`]   |
//! | `records` | binary | [`records`]   |
//! | `sql`     | text   | [`sql`]       |
//! | `tsv`     | text   | [`tsv`]       |
//! | `xml`     | text   | [`xml`]       |

pub mod csv;
pub mod encoder;
pub mod error;
pub mod export;
pub mod format;
pub mod json;
pub mod msgpack;
pub mod records;
pub mod registry;
pub mod sql;
mod tabular;
pub mod tsv;
pub mod xml;

#[cfg(test)]
mod testing;

pub use csv::CsvEncoder;
pub use encoder::{EncodeContext, Encoded, Encoder, DEFAULT_DATASET_NAME};
pub use error::{EncodeError, Result};
pub use export::{export, ExportOptions, ExportSummary, OutputTarget};
pub use format::FormatInfo;
pub use json::JsonEncoder;
pub use msgpack::MessagePackEncoder;
pub use records::{decode_records, RecordsEncoder, RecordsError};
pub use registry::EncoderRegistry;
pub use sql::SqlEncoder;
pub use tsv::TsvEncoder;
pub use xml::XmlEncoder;
