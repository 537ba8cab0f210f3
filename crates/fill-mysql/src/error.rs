//! Error types for the MySQL backend.

use fill_generator::FillError;
use thiserror::Error;

/// Errors that can occur while filling a MySQL table.
#[derive(Error, Debug)]
pub enum MySQLFillError {
    /// MySQL connection or query error.
    #[error("MySQL error: {0}")]
    MySQL(#[from] mysql_async::Error),

    /// Malformed connection string.
    #[error("Invalid MySQL connection string: {0}")]
    Url(#[from] mysql_async::UrlError),

    /// The fill operation itself failed.
    #[error(transparent)]
    Fill(#[from] FillError),
}
