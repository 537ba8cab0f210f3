//! PostgreSQL fill entry point.

use crate::catalog::PostgreSQLCatalogReader;
use crate::dialect::PostgreSQLDialect;
use crate::error::PostgreSQLFillError;
use crate::executor::PostgreSQLExecutor;
use crate::sampler::PostgreSQLSampler;
use fill_generator::{FillOptions, FillReport, SchemaFillDriver, StatementExecutor};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::{Client, NoTls};
use tracing::info;

/// Fills PostgreSQL tables with synthetic rows.
pub struct PostgreSQLFiller {
    client: Arc<Mutex<Client>>,
    schema: String,
}

impl PostgreSQLFiller {
    /// Connect and verify the connection.
    ///
    /// # Arguments
    ///
    /// * `connection_string` - PostgreSQL connection string (e.g., "host=localhost user=postgres password=postgres dbname=testdb")
    /// * `schema` - Schema searched for unqualified table names
    pub async fn new(
        connection_string: &str,
        schema: impl Into<String>,
    ) -> Result<Self, PostgreSQLFillError> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls).await?;

        // Spawn the connection task
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        // Test connection
        client.simple_query("SELECT 1").await?;

        Ok(Self::with_client(Arc::new(Mutex::new(client)), schema))
    }

    /// Create a filler with an existing client.
    pub fn with_client(client: Arc<Mutex<Client>>, schema: impl Into<String>) -> Self {
        Self {
            client,
            schema: schema.into(),
        }
    }

    /// Schema searched for unqualified table names.
    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Insert `options.row_count` rows into `options.target_table`.
    pub async fn fill(&self, options: &FillOptions) -> Result<FillReport, PostgreSQLFillError> {
        let (report, _) = self
            .fill_with_executor(options, PostgreSQLExecutor::new(self.client.clone()))
            .await?;
        Ok(report)
    }

    /// Fill using the live catalog and sampler but a caller-supplied executor
    /// (dry runs print instead of inserting).
    pub async fn fill_with_executor<E: StatementExecutor>(
        &self,
        options: &FillOptions,
        executor: E,
    ) -> Result<(FillReport, E), PostgreSQLFillError> {
        info!(
            "Filling PostgreSQL table '{}' (schema '{}')",
            options.target_table, self.schema
        );
        let mut driver = SchemaFillDriver::new(
            PostgreSQLCatalogReader::new(self.client.clone(), self.schema.clone()),
            PostgreSQLSampler::new(self.client.clone()),
            executor,
            PostgreSQLDialect,
        );
        let report = driver.fill(options).await?;
        let (_, _, executor) = driver.into_parts();
        Ok((report, executor))
    }
}
