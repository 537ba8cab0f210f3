//! Error types for the PostgreSQL backend.

use fill_generator::FillError;
use thiserror::Error;

/// Errors that can occur while filling a PostgreSQL table.
#[derive(Error, Debug)]
pub enum PostgreSQLFillError {
    /// PostgreSQL connection or query error.
    #[error("PostgreSQL error: {0}")]
    PostgreSQL(#[from] tokio_postgres::Error),

    /// The fill operation itself failed.
    #[error(transparent)]
    Fill(#[from] FillError),
}
