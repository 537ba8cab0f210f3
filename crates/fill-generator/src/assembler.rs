//! Row assembly.
//!
//! The assembler makes two passes over the same descriptor sequence: the
//! column-list pass once per fill, and the value-list pass once per row. Both
//! walk [`TableDescriptor::insertable_columns`], so the i-th rendered value
//! always belongs to the i-th listed column.

use crate::directive::{resolve_directive, Directive};
use crate::error::FillError;
use crate::generators::{generate, GeneratorSpec};
use crate::options::FillOptions;
use crate::resolver::{ForeignKeyResolution, ForeignKeyResolver, ForeignKeySampler};
use fill_core::{ColumnDescriptor, FillValue, SqlDialect, TableDescriptor};
use rand::Rng;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Redraws allowed for a primary/unique column before a repeat is accepted.
pub const MAX_UNIQUE_ATTEMPTS: usize = 32;

/// One complete row-insertion directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    /// Target table, unquoted
    pub table: String,
    /// Quoted column identifiers, in descriptor order
    pub columns: Vec<String>,
    /// Rendered literals, positionally aligned with `columns`
    pub values: Vec<String>,
    /// The full statement text
    pub sql: String,
}

/// Result of assembling one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row is ready to execute
    Row(InsertStatement),

    /// A non-nullable foreign key references an empty table
    Unsatisfiable {
        /// Referencing column
        column: String,
        /// Referenced table
        referenced_table: String,
        /// Referenced column
        referenced_column: String,
    },
}

/// Builds insert statements for one table.
pub struct RowAssembler<'a> {
    table: &'a TableDescriptor,
    options: &'a FillOptions,
    dialect: &'a dyn SqlDialect,
    quoted_table: String,
    column_list: Vec<String>,
    seen: HashMap<String, HashSet<String>>,
}

/// Whether repeated values must be avoided for a generated column.
fn needs_unique_values(column: &ColumnDescriptor) -> bool {
    (column.primary_key || column.unique) && !column.is_foreign_key()
}

impl<'a> RowAssembler<'a> {
    /// Run the column-list pass.
    ///
    /// Columns that will always be NULL (unsupported type, missing length
    /// bound) are reported once here rather than on every row.
    pub fn new(
        table: &'a TableDescriptor,
        options: &'a FillOptions,
        dialect: &'a dyn SqlDialect,
    ) -> Self {
        let column_list = table
            .insertable_columns()
            .map(|c| dialect.quote_identifier(&c.name))
            .collect();

        for column in table.insertable_columns() {
            if resolve_directive(column, options) == Directive::Null {
                warn!(
                    "Column '{}' ({}) of '{}' has no usable generator; it will be filled with NULL",
                    column.name, column.declared_type, table.name
                );
            }
        }

        Self {
            table,
            options,
            dialect,
            quoted_table: dialect.quote_identifier(&table.name),
            column_list,
            seen: HashMap::new(),
        }
    }

    /// Quoted column identifiers shared by every row.
    pub fn column_list(&self) -> &[String] {
        &self.column_list
    }

    /// Run the value-list pass for one row.
    pub async fn assemble_row<R, S>(
        &mut self,
        rng: &mut R,
        resolver: &mut ForeignKeyResolver<S>,
    ) -> Result<RowOutcome, FillError>
    where
        R: Rng + Send,
        S: ForeignKeySampler,
    {
        let table = self.table;
        let mut values = Vec::with_capacity(self.column_list.len());

        for column in table.insertable_columns() {
            let value = match resolve_directive(column, self.options) {
                // Unreachable for participating columns; kept so alignment
                // never depends on that.
                Directive::Omit => FillValue::Null,

                Directive::ForeignKey {
                    table: referenced_table,
                    column: referenced_column,
                } => {
                    let resolution = resolver
                        .resolve(column, &referenced_table, &referenced_column)
                        .await
                        .map_err(|cause| FillError::Sampler {
                            referenced_table: referenced_table.clone(),
                            referenced_column: referenced_column.clone(),
                            cause,
                        })?;

                    match resolution {
                        ForeignKeyResolution::Sampled(value) => value,
                        ForeignKeyResolution::Null => FillValue::Null,
                        ForeignKeyResolution::Unsatisfiable => {
                            return Ok(RowOutcome::Unsatisfiable {
                                column: column.name.clone(),
                                referenced_table,
                                referenced_column,
                            });
                        }
                    }
                }

                Directive::Generate(spec) => {
                    if needs_unique_values(column) {
                        self.generate_unique(column, &spec, rng)
                    } else {
                        generate(&spec, rng)
                    }
                }

                Directive::Null => FillValue::Null,
            };

            values.push(self.dialect.render_value(&value));
        }

        debug_assert_eq!(values.len(), self.column_list.len());

        let sql = self
            .dialect
            .insert_statement(&self.quoted_table, &self.column_list, &values);

        Ok(RowOutcome::Row(InsertStatement {
            table: table.name.clone(),
            columns: self.column_list.clone(),
            values,
            sql,
        }))
    }

    fn generate_unique<R: Rng>(
        &mut self,
        column: &ColumnDescriptor,
        spec: &GeneratorSpec,
        rng: &mut R,
    ) -> FillValue {
        let seen = self.seen.entry(column.name.clone()).or_default();

        let mut value = generate(spec, rng);
        for _ in 1..MAX_UNIQUE_ATTEMPTS {
            if !seen.contains(&self.dialect.render_value(&value)) {
                break;
            }
            value = generate(spec, rng);
        }

        if !seen.insert(self.dialect.render_value(&value)) {
            warn!(
                "Could not find an unused value for unique column '{}' of '{}' after {} attempts",
                column.name, self.table.name, MAX_UNIQUE_ATTEMPTS
            );
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySampler;
    use fill_core::{AnsiDialect, DeclaredType, ForeignKeyRef, IntegerKind};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn employee() -> TableDescriptor {
        TableDescriptor::new(
            "employee",
            vec![
                ColumnDescriptor::new("id", DeclaredType::integer(IntegerKind::Int))
                    .primary_key()
                    .auto_generated(),
                ColumnDescriptor::new("name", DeclaredType::VarChar).with_max_length(10),
                ColumnDescriptor::new("age", DeclaredType::integer(IntegerKind::Tiny)),
                ColumnDescriptor::new("dept_id", DeclaredType::integer(IntegerKind::Int))
                    .nullable()
                    .references(ForeignKeyRef::new("dept", "id")),
                ColumnDescriptor::new("notes", DeclaredType::unsupported("xml")).nullable(),
            ],
        )
        .unwrap()
    }

    fn row(outcome: RowOutcome) -> InsertStatement {
        match outcome {
            RowOutcome::Row(statement) => statement,
            other => panic!("Expected a row, got {other:?}"),
        }
    }

    #[test]
    fn test_column_list_skips_auto_generated() {
        let table = employee();
        let options = FillOptions::new("employee", 1);
        let assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        assert_eq!(
            assembler.column_list(),
            &["\"name\"", "\"age\"", "\"dept_id\"", "\"notes\""]
        );
    }

    #[tokio::test]
    async fn test_values_align_with_columns() {
        let table = employee();
        let options = FillOptions::new("employee", 1);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver =
            ForeignKeyResolver::new(InMemorySampler::new(1).with_values("dept", "id", ["7"]));
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..25 {
            let statement = row(assembler.assemble_row(&mut rng, &mut resolver).await.unwrap());
            assert_eq!(statement.values.len(), statement.columns.len());

            for (column, value) in table.insertable_columns().zip(&statement.values) {
                if column.declared_type.is_numeric() && !column.nullable {
                    assert!(value.parse::<f64>().is_ok(), "{}: {value}", column.name);
                }
            }

            let name = &statement.values[0];
            assert!(name.starts_with('\'') && name.ends_with('\''));
            assert!(name.len() - 2 <= 10);

            let age: i64 = statement.values[1].parse().unwrap();
            assert!((0..=255).contains(&age));

            assert_eq!(statement.values[2], "7");
            assert_eq!(statement.values[3], "NULL");
            assert!(statement.sql.starts_with(
                "INSERT INTO \"employee\" (\"name\", \"age\", \"dept_id\", \"notes\") VALUES ("
            ));
        }
    }

    #[tokio::test]
    async fn test_empty_nullable_foreign_key_is_null() {
        let table = employee();
        let options = FillOptions::new("employee", 1);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(1));
        let mut rng = StdRng::seed_from_u64(42);

        let statement = row(assembler.assemble_row(&mut rng, &mut resolver).await.unwrap());
        assert_eq!(statement.values[2], "NULL");
    }

    #[tokio::test]
    async fn test_unsatisfiable_foreign_key() {
        let table = TableDescriptor::new(
            "employee",
            vec![ColumnDescriptor::new("dept_id", DeclaredType::default())
                .references(ForeignKeyRef::new("dept", "id"))],
        )
        .unwrap();
        let options = FillOptions::new("employee", 1);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(1));
        let mut rng = StdRng::seed_from_u64(42);

        let outcome = assembler.assemble_row(&mut rng, &mut resolver).await.unwrap();
        assert_eq!(
            outcome,
            RowOutcome::Unsatisfiable {
                column: "dept_id".into(),
                referenced_table: "dept".into(),
                referenced_column: "id".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_unique_column_avoids_repeats() {
        let table = TableDescriptor::new(
            "codes",
            vec![
                ColumnDescriptor::new("code", DeclaredType::integer(IntegerKind::Tiny)).primary_key(),
            ],
        )
        .unwrap();
        let options = FillOptions::new("codes", 1);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(1));
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..50 {
            let statement = row(assembler.assemble_row(&mut rng, &mut resolver).await.unwrap());
            assert!(seen.insert(statement.values[0].clone()));
        }
    }

    #[tokio::test]
    async fn test_char_primary_key_rows_are_distinct() {
        let table = TableDescriptor::new(
            "country",
            vec![
                ColumnDescriptor::new("code", DeclaredType::Char)
                    .with_max_length(3)
                    .primary_key(),
                ColumnDescriptor::new("label", DeclaredType::Char).with_max_length(4),
            ],
        )
        .unwrap();
        let options = FillOptions::new("country", 5);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(1));
        let mut rng = StdRng::seed_from_u64(42);

        let mut codes = HashSet::new();
        for _ in 0..5 {
            let statement = row(assembler.assemble_row(&mut rng, &mut resolver).await.unwrap());
            let code = statement.values[0].clone();
            assert_eq!(code.len(), 5, "{code}");
            assert!(codes.insert(code));
            assert_eq!(statement.values[1], "'abcd'");
        }
    }

    #[tokio::test]
    async fn test_all_auto_generated_uses_default_values() {
        let table = TableDescriptor::new(
            "counters",
            vec![ColumnDescriptor::new("id", DeclaredType::default())
                .primary_key()
                .auto_generated()],
        )
        .unwrap();
        let options = FillOptions::new("counters", 1);
        let mut assembler = RowAssembler::new(&table, &options, &AnsiDialect);
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(1));
        let mut rng = StdRng::seed_from_u64(42);

        let statement = row(assembler.assemble_row(&mut rng, &mut resolver).await.unwrap());
        assert!(statement.columns.is_empty());
        assert!(statement.values.is_empty());
        assert_eq!(statement.sql, "INSERT INTO \"counters\" DEFAULT VALUES");
    }
}
