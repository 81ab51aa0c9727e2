//! Error types for the territorial data model.

/// Errors raised while loading, building, or checking territorial data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// Source bytes could not be interpreted as the expected schema.
    #[error("failed to parse data using the {parser} parser: {detail}")]
    ParseFailure { parser: String, detail: String },

    #[error("no raw data loaded")]
    NotLoaded,

    #[error("duplicate primary key {id} in table {table}")]
    DuplicateKey { table: &'static str, id: i64 },

    #[error("row {id} in table {table} is missing required column {column}")]
    MissingColumn {
        table: &'static str,
        id: i64,
        column: &'static str,
    },

    /// A denormalized ancestor key disagrees with the parent's own chain.
    #[error("row {id} in table {table}: {column} is {found} but its parent chain says {expected}")]
    InconsistentReference {
        table: &'static str,
        id: i64,
        column: &'static str,
        expected: i64,
        found: i64,
    },

    #[error("row {id} in table {table}: {column} references missing row {value}")]
    OrphanedReference {
        table: &'static str,
        id: i64,
        column: &'static str,
        value: i64,
    },
}

/// Result type for data model operations.
pub type Result<T> = std::result::Result<T, DataError>;
