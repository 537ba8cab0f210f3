//! Statement executor trait.

use crate::assembler::InsertStatement;
use async_trait::async_trait;
use tracing::info;

/// Performs the insertion of one assembled row.
///
/// Failures are propagated to the caller as-is; nothing is rolled back. Run
/// the fill inside an external transaction when all-or-nothing is needed.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Execute one insert statement.
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()>;
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for Box<T> {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        (**self).execute(statement).await
    }
}

/// Executor that only logs statements.
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    statements: u64,
}

impl DryRunExecutor {
    /// Number of statements seen.
    pub fn statements(&self) -> u64 {
        self.statements
    }
}

#[async_trait]
impl StatementExecutor for DryRunExecutor {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        self.statements += 1;
        info!("[DRY-RUN] {}", statement.sql);
        Ok(())
    }
}
