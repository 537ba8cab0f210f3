//! Executor that writes statements instead of running them.

use async_trait::async_trait;
use fill_generator::{InsertStatement, StatementExecutor};
use std::io::Write;

/// Writes each statement, terminated by `;`, on its own line.
#[derive(Debug)]
pub struct PrintExecutor<W> {
    out: W,
    statements: u64,
}

impl<W: Write + Send> PrintExecutor<W> {
    pub fn new(out: W) -> Self {
        Self { out, statements: 0 }
    }

    /// Number of statements written.
    pub fn statements(&self) -> u64 {
        self.statements
    }

    /// Take the writer back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> StatementExecutor for PrintExecutor<W> {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        writeln!(self.out, "{};", statement.sql)?;
        self.statements += 1;
        Ok(())
    }
}
