//! SQL script: schema DDL followed by batched inserts.
//!
//! Tables are created in dependency order so every foreign key points at a
//! table that already exists. Constraint names follow `pk_<table>`,
//! `fk_<table>_<column>` and `ix_<table>_<column>`.

use std::fmt::Write as _;

use dtb_core::{ColumnRole, Dataset, Serializer, TableData, TerritorialData, Value};

use crate::encoder::{EncodeContext, Encoded, Encoder};
use crate::error::{EncodeError, Result};
use crate::format::FormatInfo;

static FORMAT: FormatInfo = FormatInfo {
    name: "sql",
    friendly_name: "SQL",
    extension: ".sql",
    category: "Database",
    mime_types: &["application/sql", "text/x-sql"],
    info_url: "https://en.wikipedia.org/wiki/SQL",
    binary: false,
};

/// Rows per `INSERT` statement.
pub const INSERT_BATCH_SIZE: usize = 500;

pub struct SqlEncoder;

impl Encoder for SqlEncoder {
    fn format(&self) -> &'static FormatInfo {
        &FORMAT
    }

    fn encode(&self, data: &TerritorialData, ctx: &EncodeContext<'_>) -> Result<Encoded> {
        let dataset = Serializer::new().with_include_key(true).serialize(data);
        let style = Style::new(ctx.minified);
        let mut out = String::new();

        writeln!(out, "-- {}", ctx.dataset_name.replace('\n', " ")).map_err(fmt_error)?;
        if !ctx.minified {
            out.push('\n');
        }

        for table in dataset.tables() {
            create_table(&mut out, &dataset, table, &style)?;
        }
        for table in dataset.tables() {
            insert_rows(&mut out, table, &style)?;
        }

        Ok(Encoded::Text(out))
    }
}

/// Whitespace between statement parts.
struct Style {
    minified: bool,
    /// Separator between list items.
    item: &'static str,
    /// Text after an opening parenthesis or keyword.
    open: &'static str,
    /// Text before a closing parenthesis.
    close: &'static str,
}

impl Style {
    fn new(minified: bool) -> Self {
        if minified {
            Self {
                minified,
                item: ", ",
                open: "",
                close: "",
            }
        } else {
            Self {
                minified,
                item: ",\n  ",
                open: "\n  ",
                close: "\n",
            }
        }
    }
}

fn create_table(out: &mut String, dataset: &Dataset, table: &TableData, style: &Style) -> Result<()> {
    let kind = table.kind();
    let name = kind.table_name();

    let mut parts: Vec<String> = kind
        .columns()
        .iter()
        .map(|c| format!("{} {} NOT NULL", c.name, c.ty))
        .collect();

    for column in kind.columns() {
        match column.role {
            ColumnRole::PrimaryKey => {
                parts.push(format!("CONSTRAINT pk_{name} PRIMARY KEY ({})", column.name));
            }
            // Only reference tables that are part of the script.
            ColumnRole::ForeignKey(target) if dataset.table(target).is_some() => {
                parts.push(format!(
                    "CONSTRAINT fk_{name}_{col} FOREIGN KEY ({col}) REFERENCES {target} (id)",
                    col = column.name,
                ));
            }
            _ => {}
        }
    }

    writeln!(
        out,
        "CREATE TABLE {name} ({}{}{});",
        style.open,
        parts.join(style.item),
        style.close
    )
    .map_err(fmt_error)?;

    for column in kind.columns().iter().filter(|c| c.indexed) {
        writeln!(out, "CREATE INDEX ix_{name}_{col} ON {name} ({col});", col = column.name)
            .map_err(fmt_error)?;
    }

    if !style.minified {
        out.push('\n');
    }
    Ok(())
}

fn insert_rows(out: &mut String, table: &TableData, style: &Style) -> Result<()> {
    let columns = table.columns().join(", ");

    for batch in table.rows().chunks(INSERT_BATCH_SIZE) {
        let tuples: Vec<String> = batch
            .iter()
            .map(|row| {
                let values: Vec<String> = row.values().map(literal).collect();
                format!("({})", values.join(", "))
            })
            .collect();

        writeln!(
            out,
            "INSERT INTO {} ({columns}) VALUES{}{};",
            table.name(),
            if style.minified { " " } else { style.open },
            tuples.join(style.item)
        )
        .map_err(fmt_error)?;
    }

    if !style.minified && !table.is_empty() {
        out.push('\n');
    }
    Ok(())
}

fn literal(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
    }
}

fn fmt_error(err: std::fmt::Error) -> EncodeError {
    EncodeError::failure(FORMAT.name, err)
}
