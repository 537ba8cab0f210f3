//! Error type for fill operations.

use fill_core::SchemaError;

/// Errors surfaced to the caller of a fill operation.
///
/// Unsupported column types and missing length bounds are not errors: those
/// columns are filled with NULL and the fill continues.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    /// Options failed validation
    #[error("Invalid fill options: {0}")]
    InvalidOptions(String),

    /// The catalog has no such table
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// The catalog read failed
    #[error("Failed to read column metadata for '{table}': {cause:#}")]
    Catalog { table: String, cause: anyhow::Error },

    /// Sampling a referenced table failed
    #[error("Failed to sample {referenced_table}.{referenced_column}: {cause:#}")]
    Sampler {
        referenced_table: String,
        referenced_column: String,
        cause: anyhow::Error,
    },

    /// A non-nullable foreign key points at an empty table
    #[error(
        "Column '{column}' of '{table}' is NOT NULL but referenced table '{referenced_table}' \
         has no {referenced_column} values; aborted after {rows_emitted} row(s)"
    )]
    UnsatisfiableForeignKey {
        table: String,
        column: String,
        referenced_table: String,
        referenced_column: String,
        rows_emitted: u64,
    },

    /// The executor rejected a row
    #[error("Insert of row {row} into '{table}' failed: {cause:#}")]
    Executor {
        table: String,
        row: u64,
        cause: anyhow::Error,
    },

    /// Descriptor validation failed
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
