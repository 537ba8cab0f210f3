//! Foreign-key sampling against live MySQL tables.

use crate::dialect::MySQLDialect;
use async_trait::async_trait;
use fill_core::SqlDialect;
use fill_generator::ForeignKeySampler;
use mysql_async::prelude::*;
use mysql_async::Pool;

/// Samples one random non-NULL value of a referenced column.
///
/// Identifiers cannot be bound as parameters. They come from the catalog and
/// are quoted by [`MySQLDialect`] before they reach the query text.
#[derive(Debug, Clone)]
pub struct MySQLSampler {
    pool: Pool,
}

impl MySQLSampler {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

/// Query used to sample `table.column`.
pub fn sample_query(table: &str, column: &str) -> String {
    let dialect = MySQLDialect;
    let column = dialect.quote_identifier(column);
    format!(
        "SELECT CAST({column} AS CHAR) FROM {} WHERE {column} IS NOT NULL ORDER BY RAND() LIMIT 1",
        dialect.quote_identifier(table)
    )
}

#[async_trait]
impl ForeignKeySampler for MySQLSampler {
    async fn sample(&mut self, table: &str, column: &str) -> anyhow::Result<Option<String>> {
        let query = sample_query(table, column);
        let mut conn = self.pool.get_conn().await?;
        let value: Option<String> = conn.query_first(query).await?;
        Ok(value)
    }
}
