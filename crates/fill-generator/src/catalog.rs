//! Catalog reader trait.

use async_trait::async_trait;
use fill_core::TableDescriptor;

/// Source of column metadata for a table.
///
/// A fill operation calls `describe_table` exactly once and works from the
/// returned snapshot for its whole lifetime, so a schema change mid-run never
/// shifts the column/value alignment.
#[async_trait]
pub trait CatalogReader: Send {
    /// Describe `table`, returning `None` when the catalog has no such table.
    ///
    /// Columns must be returned in ordinal order.
    async fn describe_table(&mut self, table: &str) -> anyhow::Result<Option<TableDescriptor>>;
}
