//! Serializer: the encoder-facing adapter over [`TerritorialData::to_dict`].

use crate::dict::{Dataset, ToDictOptions};
use crate::tree::TerritorialData;

/// Produces the normalized structure with encoder-chosen options.
///
/// Pure: the same tree and options always give the same [`Dataset`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Serializer {
    options: ToDictOptions,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string_keys(mut self, enabled: bool) -> Self {
        self.options.string_keys = enabled;
        self
    }

    pub fn with_force_text(mut self, enabled: bool) -> Self {
        self.options.force_text = enabled;
        self
    }

    pub fn with_include_key(mut self, enabled: bool) -> Self {
        self.options.include_key = enabled;
        self
    }

    pub fn options(&self) -> ToDictOptions {
        self.options
    }

    pub fn serialize(&self, data: &TerritorialData) -> Dataset {
        data.to_dict(self.options)
    }
}
