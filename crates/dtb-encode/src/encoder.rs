//! Encoder trait and core abstractions.

use dtb_core::TerritorialData;

use crate::error::Result;
use crate::format::FormatInfo;

/// Dataset name used when none is configured.
pub const DEFAULT_DATASET_NAME: &str = "Divisão Territorial Brasileira";

/// Context passed to encoders.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    /// Localized dataset name, used as the document title where a format has one.
    pub dataset_name: &'a str,
    /// Drop optional whitespace.
    pub minified: bool,
}

impl<'a> EncodeContext<'a> {
    pub fn new(dataset_name: &'a str) -> Self {
        Self {
            dataset_name,
            minified: false,
        }
    }

    pub fn minified(mut self, minified: bool) -> Self {
        self.minified = minified;
        self
    }
}

impl Default for EncodeContext<'static> {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_NAME)
    }
}

/// Encoded output. Text formats yield a `String`, binary formats raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Text(String),
    Binary(Vec<u8>),
}

impl Encoded {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Text(text) => text.as_bytes(),
            Encoded::Binary(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Encoded::Text(text) => text.into_bytes(),
            Encoded::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Encoded::Text(text) => Some(text),
            Encoded::Binary(_) => None,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Encoded::Binary(_))
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Trait for all output encoders.
///
/// Encoders never touch the filesystem; [`crate::export`] owns I/O.
pub trait Encoder: Send + Sync {
    /// Metadata describing the produced format.
    fn format(&self) -> &'static FormatInfo;

    /// Encode the whole tree.
    fn encode(&self, data: &TerritorialData, ctx: &EncodeContext<'_>) -> Result<Encoded>;
}
