//! Section layout shared by the delimited-text encoders.
//!
//! ```text
//! uf
//! id<TAB>nome
//! 11<TAB>Rondônia
//!
//! mesorregiao
//! ...
//! ```
//!
//! One section per non-empty table: the table name, a header row, then one
//! line per row. Sections are separated by a blank line.

use dtb_core::{Dataset, Serializer, TerritorialData};

/// Serializer configuration for delimited text: every value is text and the
/// key stays in the row so the `id` column is written.
pub(crate) fn serializer() -> Serializer {
    Serializer::new()
        .with_string_keys(true)
        .with_force_text(true)
        .with_include_key(true)
}

/// Render every table with the given field separator, line terminator, and
/// per-field quoting function.
pub(crate) fn write_sections(
    data: &TerritorialData,
    separator: char,
    newline: &str,
    quote: impl Fn(&str) -> String,
) -> String {
    let dataset: Dataset = serializer().serialize(data);
    let mut out = String::new();

    for (i, table) in dataset.tables().iter().enumerate() {
        if i > 0 {
            out.push_str(newline);
        }
        out.push_str(&quote(table.name()));
        out.push_str(newline);

        push_line(&mut out, table.columns().iter().copied(), separator, newline, &quote);
        for row in table.rows() {
            let cells = row.values().map(|v| v.as_text().unwrap_or_default());
            push_line(&mut out, cells, separator, newline, &quote);
        }
    }
    out
}

fn push_line<'a>(
    out: &mut String,
    cells: impl Iterator<Item = &'a str>,
    separator: char,
    newline: &str,
    quote: &impl Fn(&str) -> String,
) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(&quote(cell));
    }
    out.push_str(newline);
}
