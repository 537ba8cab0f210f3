//! Statement execution over a MySQL pool.

use async_trait::async_trait;
use fill_generator::{InsertStatement, StatementExecutor};
use mysql_async::prelude::*;
use mysql_async::Pool;
use tracing::debug;

/// Executes each assembled statement on a pooled connection.
#[derive(Debug, Clone)]
pub struct MySQLExecutor {
    pool: Pool,
}

impl MySQLExecutor {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementExecutor for MySQLExecutor {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        debug!("Executing: {}", statement.sql);
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(statement.sql.as_str()).await?;
        Ok(())
    }
}
