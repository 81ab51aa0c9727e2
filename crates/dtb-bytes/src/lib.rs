//! Fixed-width binary packing for territorial dataset encoders.
//!
//! [`ByteBuffer`] writes and reads values sequentially. Nothing in the stream
//! describes itself: writer and reader must agree on field order and types.
//!
//! ## Value Layout
//!
//! ```text
//! byte     │ 1 byte
//! boolean  │ 1 byte (0x00 / 0x01)
//! int      │ 4 bytes, big-endian two's complement
//! long     │ 8 bytes, big-endian two's complement
//! float    │ 4 bytes, big-endian IEEE-754
//! string   │ int length (encoded bytes) + raw bytes
//! ```

mod buffer;

pub use buffer::{ByteBuffer, BytesError, TextEncoding};

/// Result type for buffer operations.
pub type Result<T> = std::result::Result<T, BytesError>;
