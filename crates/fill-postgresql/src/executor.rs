//! Statement execution over a shared PostgreSQL client.

use async_trait::async_trait;
use fill_generator::{InsertStatement, StatementExecutor};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::Client;
use tracing::debug;

/// Executes each assembled statement on the shared client.
pub struct PostgreSQLExecutor {
    client: Arc<Mutex<Client>>,
}

impl PostgreSQLExecutor {
    pub fn new(client: Arc<Mutex<Client>>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatementExecutor for PostgreSQLExecutor {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        debug!("Executing: {}", statement.sql);
        let client = self.client.lock().await;
        client.execute(statement.sql.as_str(), &[]).await?;
        Ok(())
    }
}
