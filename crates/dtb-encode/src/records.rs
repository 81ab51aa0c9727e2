//! Compact fixed-width record format.
//!
//! ## Layout
//!
//! ```text
//! magic      "DTB\0"
//! version    byte
//! tables     int
//! per table:
//!   name     string
//!   rows     int
//!   per row: every column in schema order
//!            SMALLINT / INTEGER → int, BIGINT → long, VARCHAR → string
//! trailer    SHA-256 of everything above (32 bytes)
//! ```
//!
//! Values are packed with [`ByteBuffer`]: big-endian, strings length-prefixed.

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use dtb_bytes::{ByteBuffer, BytesError};
use dtb_core::{ColumnRole, ColumnType, DataError, Division, EntityKind, Serializer, TerritorialData, Value};

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;

/// Magic bytes identifying a records file: "DTB\0"
pub const MAGIC: [u8; 4] = [0x44, 0x54, 0x42, 0x00];

/// Current layout version.
pub const VERSION: u8 = 1;

const HASH_SIZE: usize = 32;

static FORMAT: FormatInfo = FormatInfo {
    name: "records",
    friendly_name: "DTB Records",
    extension: ".dtb",
    category: "Binary Records",
    mime_types: &["application/octet-stream"],
    info_url: "https://www.ibge.gov.br/geociencias/organizacao-do-territorio/estrutura-territorial.html",
    binary: true,
};

/// Errors from reading a records file.
#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("file too small to be a valid records file")]
    FileTooSmall,

    #[error("invalid magic bytes: expected DTB\\0")]
    InvalidMagic,

    #[error("unsupported records version {0}")]
    UnsupportedVersion(u8),

    #[error("content hash mismatch: file is corrupted")]
    HashMismatch,

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("negative count {0}")]
    NegativeCount(i32),

    #[error("{0} trailing bytes after last table")]
    TrailingBytes(usize),

    #[error("malformed value: {0}")]
    Bytes(#[from] BytesError),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub struct RecordsEncoder;

impl Encoder for RecordsEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, _ctx: &EncodeContext<'_>) -> Result<Encoded> {
        let dataset = Serializer::new().with_include_key(true).serialize(data);
        // rough per-row size; the buffer grows past it if needed
        let mut buf =
            ByteBuffer::with_capacity(MAGIC.len() + HASH_SIZE + 48 * dataset.total_rows());

        buf.write_raw(&MAGIC);
        buf.write_byte(VERSION);
        buf.write_int(count(dataset.len(), None)?);

        for table in dataset.tables() {
            let name = table.name();
            buf.write_string(name)
                .map_err(|e| EncodeError::table_failure(FORMAT.name, name, e))?;
            buf.write_int(count(table.len(), Some(name))?);

            let columns = table.kind().columns();
            for row in table.rows() {
                for (column, value) in columns.iter().zip(row.values()) {
                    write_value(&mut buf, column.ty, value).map_err(|detail| {
                        EncodeError::table_failure(FORMAT.name, name, format!("row {}: {detail}", row.key()))
                    })?;
                }
            }
        }

        let digest = Sha256::digest(buf.as_bytes());
        buf.write_raw(&digest);
        debug!(bytes = buf.len(), "packed records");

        Ok(Encoded::Binary(buf.into_inner()))
    }
}

fn count(n: usize, table: Option<&'static str>) -> Result<i32> {
    i32::try_from(n).map_err(|_| {
        let detail = format!("count {n} does not fit an int");
        match table {
            Some(table) => EncodeError::table_failure(FORMAT.name, table, detail),
            None => EncodeError::failure(FORMAT.name, detail),
        }
    })
}

fn write_value(buf: &mut ByteBuffer, ty: ColumnType, value: &Value) -> std::result::Result<(), String> {
    match (ty, value) {
        (ColumnType::SmallInt | ColumnType::Integer, Value::Int(n)) => {
            let n = i32::try_from(*n).map_err(|_| format!("{n} does not fit {ty}"))?;
            buf.write_int(n);
        }
        (ColumnType::BigInt, Value::Int(n)) => buf.write_long(*n),
        (ColumnType::Varchar(_), Value::Text(s)) => buf.write_string(s).map_err(|e| e.to_string())?,
        (ty, value) => return Err(format!("value {value:?} does not match column type {ty}")),
    }
    Ok(())
}

/// Read a records file back into a tree named `name`.
///
/// The trailer is verified before anything else is read.
pub fn decode_records(bytes: &[u8], name: &str) -> std::result::Result<TerritorialData, RecordsError> {
    if bytes.len() < MAGIC.len() + 1 + HASH_SIZE {
        return Err(RecordsError::FileTooSmall);
    }
    if bytes[..MAGIC.len()] != MAGIC {
        return Err(RecordsError::InvalidMagic);
    }

    let (body, trailer) = bytes.split_at(bytes.len() - HASH_SIZE);
    if Sha256::digest(body).as_slice() != trailer {
        return Err(RecordsError::HashMismatch);
    }

    let mut buf = ByteBuffer::from(&body[MAGIC.len()..]);
    let version = buf.read_byte()?;
    if version != VERSION {
        return Err(RecordsError::UnsupportedVersion(version));
    }

    let mut data = TerritorialData::new(name);
    let tables = read_count(&mut buf)?;
    for _ in 0..tables {
        let table = buf.read_string()?;
        let kind = EntityKind::parse(&table).ok_or(RecordsError::UnknownTable(table))?;
        let rows = read_count(&mut buf)?;
        for _ in 0..rows {
            data.insert(kind, read_row(&mut buf, kind)?)?;
        }
    }

    if buf.remaining() > 0 {
        return Err(RecordsError::TrailingBytes(buf.remaining()));
    }
    Ok(data)
}

fn read_count(buf: &mut ByteBuffer) -> std::result::Result<usize, RecordsError> {
    let n = buf.read_int()?;
    usize::try_from(n).map_err(|_| RecordsError::NegativeCount(n))
}

fn read_row(buf: &mut ByteBuffer, kind: EntityKind) -> std::result::Result<Division, RecordsError> {
    let mut row = Division::new(0, String::new());
    for column in kind.columns() {
        match column.role {
            ColumnRole::PrimaryKey => row.id = read_key(buf, column.ty)?,
            ColumnRole::ForeignKey(target) => {
                let id = read_key(buf, column.ty)?;
                row = row.with_ref(target, id);
            }
            ColumnRole::Name => row.nome = buf.read_string()?,
        }
    }
    Ok(row)
}

fn read_key(buf: &mut ByteBuffer, ty: ColumnType) -> std::result::Result<i64, BytesError> {
    match ty {
        ColumnType::BigInt => buf.read_long(),
        _ => buf.read_int().map(i64::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample;

    fn encode(data: &TerritorialData) -> Vec<u8> {
        RecordsEncoder
            .encode(data, &EncodeContext::default())
            .unwrap()
            .into_bytes()
    }

    #[test]
    fn decodes_what_it_encodes() {
        let data = sample();
        let decoded = decode_records(&encode(&data), "copy").unwrap();
        assert_eq!(decoded.name(), "copy");
        for kind in EntityKind::ALL {
            assert_eq!(decoded.rows(kind), data.rows(kind), "table {kind}");
        }
    }

    #[test]
    fn header_layout() {
        let bytes = encode(&sample());
        assert_eq!(&bytes[..4], b"DTB\0");
        assert_eq!(bytes[4], VERSION);
        assert_eq!(&bytes[5..9], &6i32.to_be_bytes());
        // first table name: length 2, "uf"
        assert_eq!(&bytes[9..15], &[0, 0, 0, 2, b'u', b'f']);
    }

    #[test]
    fn subdistrict_keys_use_long() {
        let mut data = TerritorialData::new("t");
        data.insert(EntityKind::Uf, Division::new(11, "Rondônia")).unwrap();
        let small = encode(&data).len();

        let bytes = encode(&sample());
        let decoded = decode_records(&bytes, "t").unwrap();
        assert_eq!(decoded.rows(EntityKind::Subdistrito)[0].id, 11000150500);
        assert!(bytes.len() > small);
    }

    #[test]
    fn corrupted_data_rejected() {
        let mut bytes = encode(&sample());
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xff;
        assert!(matches!(decode_records(&bytes, "t"), Err(RecordsError::HashMismatch)));
    }

    #[test]
    fn invalid_magic_rejected() {
        let mut bytes = encode(&sample());
        bytes[0] = b'X';
        assert!(matches!(decode_records(&bytes, "t"), Err(RecordsError::InvalidMagic)));
    }

    #[test]
    fn truncated_file_rejected() {
        assert!(matches!(decode_records(b"DTB\0", "t"), Err(RecordsError::FileTooSmall)));
    }

    #[test]
    fn out_of_range_key_is_encode_failure() {
        let mut data = TerritorialData::new("t");
        data.insert(EntityKind::Uf, Division::new(i64::from(i32::MAX) + 1, "Big"))
            .unwrap();
        let err = RecordsEncoder
            .encode(&data, &EncodeContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            EncodeError::EncodeFailure { table: Some("uf"), .. }
        ));
    }

    #[test]
    fn empty_tree_round_trips() {
        let decoded = decode_records(&encode(&TerritorialData::new("t")), "t").unwrap();
        assert!(decoded.is_empty());
    }
}
