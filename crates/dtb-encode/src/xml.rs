//! XML document encoder.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <database name="Divisão Territorial Brasileira">
//!   <!-- Table uf -->
//!   <table name="uf">
//!     <row>
//!       <field name="id">11</field>
//!       <field name="nome">Rondônia</field>
//!     </row>
//!   </table>
//! </database>
//! ```

use std::fmt::Display;
use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::trace;

use dtb_core::{Serializer, TerritorialData};

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;

static FORMAT: FormatInfo = FormatInfo {
    name: "xml",
    friendly_name: "XML",
    extension: ".xml",
    category: "Data Interchange",
    mime_types: &["application/xml", "text/xml"],
    info_url: "https://en.wikipedia.org/wiki/XML",
    binary: false,
};

const INDENT: usize = 2;

pub struct XmlEncoder;

impl Encoder for XmlEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, ctx: &EncodeContext<'_>) -> Result<Encoded> {
        let dataset = Serializer::new()
            .with_force_text(true)
            .with_include_key(true)
            .serialize(data);

        let mut writer = if ctx.minified {
            Writer::new(Cursor::new(Vec::new()))
        } else {
            Writer::new_with_indent(Cursor::new(Vec::new()), b' ', INDENT)
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
            .map_err(xml_error)?;

        let mut database = BytesStart::new("database");
        database.push_attribute(("name", ctx.dataset_name));
        writer.write_event(Event::Start(database)).map_err(xml_error)?;

        for table in dataset.tables() {
            trace!(table = table.name(), rows = table.len(), "writing xml table");
            let comment = format!(" Table {} ", table.name());
            writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
                .map_err(xml_error)?;

            let mut element = BytesStart::new("table");
            element.push_attribute(("name", table.name()));
            writer.write_event(Event::Start(element)).map_err(xml_error)?;

            for row in table.rows() {
                writer
                    .write_event(Event::Start(BytesStart::new("row")))
                    .map_err(xml_error)?;
                for (column, value) in row.fields() {
                    let mut field = BytesStart::new("field");
                    field.push_attribute(("name", *column));
                    writer.write_event(Event::Start(field)).map_err(xml_error)?;
                    let text = value.to_string();
                    writer
                        .write_event(Event::Text(BytesText::new(&text)))
                        .map_err(xml_error)?;
                    writer
                        .write_event(Event::End(BytesEnd::new("field")))
                        .map_err(xml_error)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new("row")))
                    .map_err(xml_error)?;
            }

            writer
                .write_event(Event::End(BytesEnd::new("table")))
                .map_err(xml_error)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("database")))
            .map_err(xml_error)?;

        let mut text = String::from_utf8(writer.into_inner().into_inner())
            .map_err(|e| EncodeError::failure(FORMAT.name, e))?;
        text.push('\n');
        Ok(Encoded::Text(text))
    }
}

fn xml_error(err: impl Display) -> EncodeError {
    EncodeError::failure(FORMAT.name, err)
}
