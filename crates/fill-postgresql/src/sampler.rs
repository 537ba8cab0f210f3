//! Foreign-key sampling against live PostgreSQL tables.

use crate::dialect::PostgreSQLDialect;
use async_trait::async_trait;
use fill_core::SqlDialect;
use fill_generator::ForeignKeySampler;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::Client;

/// Samples one random non-NULL value of a referenced column as text.
///
/// Identifiers cannot be bound as parameters. They come from the catalog and
/// are quoted by [`PostgreSQLDialect`] before they reach the query text.
pub struct PostgreSQLSampler {
    client: Arc<Mutex<Client>>,
}

impl PostgreSQLSampler {
    pub fn new(client: Arc<Mutex<Client>>) -> Self {
        Self { client }
    }
}

/// Query used to sample `table.column`.
pub fn sample_query(table: &str, column: &str) -> String {
    let dialect = PostgreSQLDialect;
    let column = dialect.quote_identifier(column);
    format!(
        "SELECT {column}::text FROM {} WHERE {column} IS NOT NULL ORDER BY random() LIMIT 1",
        dialect.quote_identifier(table)
    )
}

#[async_trait]
impl ForeignKeySampler for PostgreSQLSampler {
    async fn sample(&mut self, table: &str, column: &str) -> anyhow::Result<Option<String>> {
        let query = sample_query(table, column);
        let client = self.client.lock().await;
        let row = client.query_opt(query.as_str(), &[]).await?;
        Ok(match row {
            Some(row) => Some(row.try_get::<_, String>(0)?),
            None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_query() {
        assert_eq!(
            sample_query("hr.dept", "dept_no"),
            "SELECT \"dept_no\"::text FROM \"hr\".\"dept\" WHERE \"dept_no\" IS NOT NULL ORDER BY random() LIMIT 1"
        );
    }
}
