//! MessagePack: the normalized structure packed as nested maps.

use dtb_core::{Serializer, TerritorialData};

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;

static FORMAT: FormatInfo = FormatInfo {
    name: "msgpack",
    friendly_name: "MessagePack",
    extension: ".msgpack",
    category: "Binary Data Interchange",
    mime_types: &["application/msgpack", "application/x-msgpack"],
    info_url: "https://en.wikipedia.org/wiki/MessagePack",
    binary: true,
};

/// Row keys stay integers and values keep their native types.
pub struct MessagePackEncoder;

impl Encoder for MessagePackEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, _ctx: &EncodeContext<'_>) -> Result<Encoded> {
        let dataset = Serializer::new().with_include_key(true).serialize(data);
        let bytes = rmp_serde::to_vec(&dataset).map_err(|e| EncodeError::failure(FORMAT.name, e))?;
        Ok(Encoded::Binary(bytes))
    }
}
