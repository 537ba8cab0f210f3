//! Fill operation driver.
//!
//! ```text
//! Start → FetchDescriptors → BuildColumnList → (AssembleRow → Emit)* → Done
//!                                                   │
//!                                                   └──► Aborted
//! ```
//!
//! Descriptors are fetched once; rows are assembled and emitted strictly one
//! at a time. `Aborted` is terminal: once a non-nullable foreign key finds
//! its referenced table empty, no further rows are attempted for the table.
//! Rows emitted before an abort or an executor failure stay in the database
//! unless the caller wraps the fill in a transaction.

use crate::assembler::{RowAssembler, RowOutcome};
use crate::catalog::CatalogReader;
use crate::error::FillError;
use crate::executor::StatementExecutor;
use crate::generators::CharPool;
use crate::options::FillOptions;
use crate::resolver::{ForeignKeyResolver, ForeignKeySampler};
use fill_core::SqlDialect;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// States of one fill operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    /// Not started
    Start,
    /// Reading column descriptors
    FetchDescriptors,
    /// Building the shared column list
    BuildColumnList,
    /// Assembling a row's values
    AssembleRow,
    /// Handing a row to the executor
    Emit,
    /// All rows emitted
    Done,
    /// Stopped on an unsatisfiable foreign key
    Aborted,
}

/// Summary of a completed fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillReport {
    /// Target table
    pub table: String,
    /// Quoted column identifiers named by every statement
    pub columns: Vec<String>,
    /// Rows handed to the executor successfully
    pub rows_emitted: u64,
    /// Foreign-key samples taken
    pub foreign_key_lookups: u64,
    /// Wall-clock time of the fill
    pub total_duration: Duration,
}

impl FillReport {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_emitted as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Orchestrates fill operations against a catalog, a sampler and an executor.
pub struct SchemaFillDriver<C, S, E> {
    catalog: C,
    resolver: ForeignKeyResolver<S>,
    executor: E,
    dialect: Box<dyn SqlDialect>,
    state: FillState,
}

impl<C, S, E> SchemaFillDriver<C, S, E>
where
    C: CatalogReader,
    S: ForeignKeySampler,
    E: StatementExecutor,
{
    /// Create a driver from its collaborators and the dialect used to render
    /// statements.
    pub fn new(catalog: C, sampler: S, executor: E, dialect: impl SqlDialect + 'static) -> Self {
        Self {
            catalog,
            resolver: ForeignKeyResolver::new(sampler),
            executor,
            dialect: Box::new(dialect),
            state: FillState::Start,
        }
    }

    /// State reached by the most recent fill.
    pub fn state(&self) -> FillState {
        self.state
    }

    /// Get a reference to the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Get a reference to the catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Take the collaborators back.
    pub fn into_parts(self) -> (C, S, E) {
        (self.catalog, self.resolver.into_sampler(), self.executor)
    }

    fn transition(&mut self, next: FillState) {
        debug!("Fill state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Insert `options.row_count` synthetic rows into `options.target_table`.
    ///
    /// Randomness comes from a generator owned by this call, seeded from
    /// `options.seed` when present.
    pub async fn fill(&mut self, options: &FillOptions) -> Result<FillReport, FillError> {
        options.validate()?;
        self.state = FillState::Start;

        let start_time = Instant::now();
        let table_name = options.target_table.as_str();
        let lookups_before = self.resolver.lookups();

        if !CharPool::is_known_factor(options.randomness_factor) {
            warn!(
                "Randomness factor {} is outside 1-4; using lowercase letters and space",
                options.randomness_factor
            );
        }

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        self.transition(FillState::FetchDescriptors);
        let table = self
            .catalog
            .describe_table(table_name)
            .await
            .map_err(|cause| FillError::Catalog {
                table: table_name.to_string(),
                cause,
            })?
            .ok_or_else(|| FillError::TableNotFound(table_name.to_string()))?;
        table.validate()?;

        self.transition(FillState::BuildColumnList);
        let mut assembler = RowAssembler::new(&table, options, self.dialect.as_ref());
        let columns = assembler.column_list().to_vec();

        info!(
            "Filling '{}' with {} rows ({} of {} columns assigned, {} dialect)",
            table_name,
            options.row_count,
            columns.len(),
            table.columns.len(),
            self.dialect.name()
        );

        let mut rows_emitted = 0u64;
        while rows_emitted < options.row_count {
            self.state = FillState::AssembleRow;
            let outcome = assembler
                .assemble_row(&mut rng, &mut self.resolver)
                .await?;

            let statement = match outcome {
                RowOutcome::Row(statement) => statement,
                RowOutcome::Unsatisfiable {
                    column,
                    referenced_table,
                    referenced_column,
                } => {
                    self.transition(FillState::Aborted);
                    return Err(FillError::UnsatisfiableForeignKey {
                        table: table_name.to_string(),
                        column,
                        referenced_table,
                        referenced_column,
                        rows_emitted,
                    });
                }
            };

            self.state = FillState::Emit;
            self.executor
                .execute(&statement)
                .await
                .map_err(|cause| FillError::Executor {
                    table: table_name.to_string(),
                    row: rows_emitted,
                    cause,
                })?;
            rows_emitted += 1;

            debug!("Row {} of {} emitted", rows_emitted, options.row_count);
        }

        self.transition(FillState::Done);

        let report = FillReport {
            table: table_name.to_string(),
            columns,
            rows_emitted,
            foreign_key_lookups: self.resolver.lookups() - lookups_before,
            total_duration: start_time.elapsed(),
        };

        info!(
            "Fill complete: {} rows into '{}' in {:?} ({:.2} rows/sec)",
            report.rows_emitted,
            report.table,
            report.total_duration,
            report.rows_per_second()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryCatalog, InMemorySampler, RecordingExecutor};
    use fill_core::{
        AnsiDialect, ColumnDescriptor, DeclaredType, ForeignKeyRef, IntegerKind, TableDescriptor,
    };

    fn employee(dept_nullable: bool) -> TableDescriptor {
        let mut dept_id = ColumnDescriptor::new("dept_id", DeclaredType::integer(IntegerKind::Int))
            .references(ForeignKeyRef::new("Dept", "dept_id"));
        dept_id.nullable = dept_nullable;

        TableDescriptor::new(
            "T",
            vec![
                ColumnDescriptor::new("id", DeclaredType::integer(IntegerKind::Int))
                    .primary_key()
                    .auto_generated(),
                ColumnDescriptor::new("name", DeclaredType::VarChar).with_max_length(10),
                ColumnDescriptor::new("age", DeclaredType::integer(IntegerKind::Tiny)),
                dept_id,
            ],
        )
        .unwrap()
    }

    fn driver(
        table: TableDescriptor,
        sampler: InMemorySampler,
        executor: RecordingExecutor,
    ) -> SchemaFillDriver<InMemoryCatalog, InMemorySampler, RecordingExecutor> {
        SchemaFillDriver::new(InMemoryCatalog::new(vec![table]), sampler, executor, AnsiDialect)
    }

    fn unquote(literal: &str) -> &str {
        literal.trim_start_matches('\'').trim_end_matches('\'')
    }

    #[tokio::test]
    async fn test_fill_emits_requested_rows() {
        let sampler = InMemorySampler::new(1).with_values("Dept", "dept_id", ["1", "2"]);
        let mut driver = driver(employee(true), sampler, RecordingExecutor::default());
        let options = FillOptions::new("T", 2).with_seed(42);

        let report = driver.fill(&options).await.unwrap();

        assert_eq!(report.rows_emitted, 2);
        assert_eq!(report.foreign_key_lookups, 2);
        assert_eq!(report.columns, vec!["\"name\"", "\"age\"", "\"dept_id\""]);
        assert_eq!(driver.state(), FillState::Done);
        assert_eq!(driver.catalog().reads(), 1);

        let statements = driver.executor().statements();
        assert_eq!(statements.len(), 2);
        for statement in statements {
            assert_eq!(statement.columns, report.columns);
            assert_eq!(statement.values.len(), 3);

            let name = unquote(&statement.values[0]);
            assert!(name.len() <= 10);
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == ' '));

            let age: i64 = statement.values[1].parse().unwrap();
            assert!((0..=255).contains(&age));

            assert!(["1", "2"].contains(&statement.values[2].as_str()));
        }
    }

    #[tokio::test]
    async fn test_fill_nullable_fk_with_empty_reference() {
        let mut driver = driver(
            employee(true),
            InMemorySampler::new(1),
            RecordingExecutor::default(),
        );
        let report = driver
            .fill(&FillOptions::new("T", 2).with_seed(42))
            .await
            .unwrap();

        assert_eq!(report.rows_emitted, 2);
        for statement in driver.executor().statements() {
            assert_eq!(statement.values[2], "NULL");
        }
    }

    #[tokio::test]
    async fn test_fill_aborts_on_unsatisfiable_fk() {
        let mut driver = driver(
            employee(false),
            InMemorySampler::new(1),
            RecordingExecutor::default(),
        );
        let result = driver.fill(&FillOptions::new("T", 2).with_seed(42)).await;

        match result {
            Err(FillError::UnsatisfiableForeignKey {
                table,
                column,
                referenced_table,
                referenced_column,
                rows_emitted,
            }) => {
                assert_eq!(table, "T");
                assert_eq!(column, "dept_id");
                assert_eq!(referenced_table, "Dept");
                assert_eq!(referenced_column, "dept_id");
                assert_eq!(rows_emitted, 0);
            }
            other => panic!("Expected UnsatisfiableForeignKey, got {other:?}"),
        }
        assert_eq!(driver.state(), FillState::Aborted);
        assert!(driver.executor().statements().is_empty());
    }

    #[tokio::test]
    async fn test_fill_same_seed_same_rows() {
        let options = FillOptions::new("T", 5).with_seed(99);

        let mut first = driver(
            employee(true),
            InMemorySampler::new(3).with_values("Dept", "dept_id", ["1", "2", "3"]),
            RecordingExecutor::default(),
        );
        let mut second = driver(
            employee(true),
            InMemorySampler::new(3).with_values("Dept", "dept_id", ["1", "2", "3"]),
            RecordingExecutor::default(),
        );

        first.fill(&options).await.unwrap();
        second.fill(&options).await.unwrap();

        assert_eq!(
            first.executor().statements(),
            second.executor().statements()
        );
    }

    #[tokio::test]
    async fn test_fill_table_not_found() {
        let mut driver = driver(
            employee(true),
            InMemorySampler::new(1),
            RecordingExecutor::default(),
        );
        let result = driver.fill(&FillOptions::new("missing", 1)).await;
        assert!(matches!(result, Err(FillError::TableNotFound(t)) if t == "missing"));
    }

    #[tokio::test]
    async fn test_fill_rejects_invalid_options() {
        let mut driver = driver(
            employee(true),
            InMemorySampler::new(1),
            RecordingExecutor::default(),
        );
        let result = driver.fill(&FillOptions::new("T", 0)).await;
        assert!(matches!(result, Err(FillError::InvalidOptions(_))));
        assert_eq!(driver.catalog().reads(), 0);
    }

    #[tokio::test]
    async fn test_executor_failure_propagates_with_row_index() {
        let mut driver = driver(
            employee(true),
            InMemorySampler::new(1),
            RecordingExecutor::failing_at(1),
        );
        let result = driver.fill(&FillOptions::new("T", 3).with_seed(1)).await;

        match result {
            Err(FillError::Executor { table, row, cause }) => {
                assert_eq!(table, "T");
                assert_eq!(row, 1);
                assert!(cause.to_string().contains("unique constraint"));
            }
            other => panic!("Expected Executor error, got {other:?}"),
        }
        assert_eq!(driver.executor().statements().len(), 1);
    }
}
