//! In-memory collaborators.
//!
//! Backed by a [`CatalogSnapshot`] or by values supplied directly, these stand
//! in for a live database in offline snapshot runs and in tests.

use crate::assembler::InsertStatement;
use crate::catalog::CatalogReader;
use crate::executor::StatementExecutor;
use crate::resolver::ForeignKeySampler;
use async_trait::async_trait;
use fill_core::{CatalogSnapshot, TableDescriptor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Catalog reader over a fixed set of table descriptors.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    tables: Vec<TableDescriptor>,
    reads: u64,
}

impl InMemoryCatalog {
    /// Create a catalog from table descriptors.
    pub fn new(tables: Vec<TableDescriptor>) -> Self {
        Self { tables, reads: 0 }
    }

    /// Create a catalog from a snapshot's tables.
    pub fn from_snapshot(snapshot: &CatalogSnapshot) -> Self {
        Self::new(snapshot.tables.clone())
    }

    /// Number of `describe_table` calls served.
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalog {
    async fn describe_table(&mut self, table: &str) -> anyhow::Result<Option<TableDescriptor>> {
        self.reads += 1;
        Ok(self.tables.iter().find(|t| t.name == table).cloned())
    }
}

/// Sampler over known values of referenced columns.
#[derive(Debug, Clone)]
pub struct InMemorySampler {
    values: HashMap<(String, String), Vec<String>>,
    rng: StdRng,
}

impl InMemorySampler {
    /// Create an empty sampler; every referenced table reads as empty.
    pub fn new(seed: u64) -> Self {
        Self {
            values: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a sampler serving a snapshot's `existing_values`.
    pub fn from_snapshot(snapshot: &CatalogSnapshot, seed: u64) -> Self {
        let mut sampler = Self::new(seed);
        for (table, columns) in &snapshot.existing_values {
            for column in columns.keys() {
                sampler = sampler.with_values(
                    table.as_str(),
                    column.as_str(),
                    snapshot.existing_values(table, column),
                );
            }
        }
        sampler
    }

    /// Add known values for `table.column`.
    pub fn with_values<I, V>(mut self, table: &str, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.values
            .entry((table.to_string(), column.to_string()))
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }
}

#[async_trait]
impl ForeignKeySampler for InMemorySampler {
    async fn sample(&mut self, table: &str, column: &str) -> anyhow::Result<Option<String>> {
        let key = (table.to_string(), column.to_string());
        Ok(match self.values.get(&key) {
            Some(values) if !values.is_empty() => {
                Some(values[self.rng.random_range(0..values.len())].clone())
            }
            _ => None,
        })
    }
}

/// Executor that keeps every statement it receives.
///
/// `fail_at` makes the executor reject the statement with that zero-based
/// index, for exercising executor failure paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    statements: Vec<InsertStatement>,
    fail_at: Option<usize>,
}

impl RecordingExecutor {
    /// Reject the statement at `index`.
    pub fn failing_at(index: usize) -> Self {
        Self {
            statements: Vec::new(),
            fail_at: Some(index),
        }
    }

    /// Statements executed so far.
    pub fn statements(&self) -> &[InsertStatement] {
        &self.statements
    }
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(&mut self, statement: &InsertStatement) -> anyhow::Result<()> {
        if self.fail_at == Some(self.statements.len()) {
            anyhow::bail!("duplicate key value violates unique constraint");
        }
        self.statements.push(statement.clone());
        Ok(())
    }
}
