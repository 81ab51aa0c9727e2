//! Sequential byte buffer with big-endian fixed-width values.
//!
//! Writes always append at the end of the buffer. Reads start at offset zero
//! and advance a separate cursor; there is no random access.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while packing or unpacking values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BytesError {
    #[error("unexpected end of buffer: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("string bytes are not valid {encoding}")]
    InvalidText { encoding: TextEncoding },

    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unencodable { encoding: TextEncoding, ch: char },

    #[error("negative string length {0}")]
    NegativeLength(i32),

    #[error("string of {0} bytes does not fit a 4-byte length header")]
    TooLong(usize),
}

/// Text encoding declared by the caller for length-prefixed strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextEncoding {
    #[default]
    Utf8,
    /// ISO-8859-1: one byte per character, code points up to U+00FF.
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "UTF-8"),
            TextEncoding::Latin1 => write!(f, "ISO-8859-1"),
        }
    }
}

impl TextEncoding {
    fn encode(self, value: &str) -> Result<Vec<u8>, BytesError> {
        match self {
            TextEncoding::Utf8 => Ok(value.as_bytes().to_vec()),
            TextEncoding::Latin1 => value
                .chars()
                .map(|ch| {
                    u8::try_from(u32::from(ch)).map_err(|_| BytesError::Unencodable {
                        encoding: self,
                        ch,
                    })
                })
                .collect(),
        }
    }

    fn decode(self, bytes: &[u8]) -> Result<String, BytesError> {
        match self {
            TextEncoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|_| BytesError::InvalidText { encoding: self }),
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

/// A growable byte buffer with an independent read cursor.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    cursor: usize,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// The whole buffer contents, regardless of the read cursor.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    // --- Writing ---

    pub fn write_byte(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn write_boolean(&mut self, value: bool) {
        self.write_byte(u8::from(value));
    }

    pub fn write_int(&mut self, value: i32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_long(&mut self, value: i64) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_float(&mut self, value: f32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Append raw bytes with no length header.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a UTF-8 string with a 4-byte length header.
    pub fn write_string(&mut self, value: &str) -> Result<(), BytesError> {
        self.write_string_as(value, TextEncoding::Utf8)
    }

    /// Write a string in the given encoding with a 4-byte length header.
    ///
    /// The length counts encoded bytes, not characters. Nothing is written
    /// if the string cannot be encoded.
    pub fn write_string_as(&mut self, value: &str, encoding: TextEncoding) -> Result<(), BytesError> {
        let bytes = encoding.encode(value)?;
        let len = i32::try_from(bytes.len()).map_err(|_| BytesError::TooLong(bytes.len()))?;
        self.write_int(len);
        self.data.extend_from_slice(&bytes);
        Ok(())
    }

    // --- Reading ---

    fn take(&mut self, needed: usize) -> Result<&[u8], BytesError> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(BytesError::UnexpectedEof { needed, remaining });
        }
        let start = self.cursor;
        self.cursor += needed;
        Ok(&self.data[start..self.cursor])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], BytesError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_byte(&mut self) -> Result<u8, BytesError> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Read a boolean. Only `0x01` is `true`.
    pub fn read_boolean(&mut self) -> Result<bool, BytesError> {
        Ok(self.read_byte()? == 1)
    }

    pub fn read_int(&mut self) -> Result<i32, BytesError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_long(&mut self) -> Result<i64, BytesError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_float(&mut self) -> Result<f32, BytesError> {
        Ok(f32::from_be_bytes(self.take_array()?))
    }

    /// Read `len` raw bytes.
    pub fn read_raw(&mut self, len: usize) -> Result<Vec<u8>, BytesError> {
        Ok(self.take(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, BytesError> {
        self.read_string_as(TextEncoding::Utf8)
    }

    /// Read a length-prefixed string in the given encoding.
    ///
    /// On failure the cursor is left where it was before the call.
    pub fn read_string_as(&mut self, encoding: TextEncoding) -> Result<String, BytesError> {
        let start = self.cursor;
        let result = self.read_string_inner(encoding);
        if result.is_err() {
            self.cursor = start;
        }
        result
    }

    fn read_string_inner(&mut self, encoding: TextEncoding) -> Result<String, BytesError> {
        let len = self.read_int()?;
        let len = usize::try_from(len).map_err(|_| BytesError::NegativeLength(len))?;
        let bytes = self.take(len)?;
        encoding.decode(bytes)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("data", &self.data)
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl fmt::Display for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.data.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
