//! Foreign-key resolution.
//!
//! Foreign-key columns are filled with a value sampled live from the
//! referenced table. There is no caching across rows: every foreign-key
//! column of every row performs its own read. No lock or snapshot is taken,
//! so a concurrent delete in the referenced table can race with the read.

use async_trait::async_trait;
use fill_core::{ColumnDescriptor, FillValue};
use tracing::debug;

/// Reads one existing value from a referenced table.
#[async_trait]
pub trait ForeignKeySampler: Send {
    /// Sample one non-null value of `column` from `table`, chosen at random.
    ///
    /// Returns `None` when the table holds no such value. Implementations
    /// receive identifiers that came from the catalog and must quote them
    /// through their dialect; values are never interpolated.
    async fn sample(&mut self, table: &str, column: &str) -> anyhow::Result<Option<String>>;
}

#[async_trait]
impl<T: ForeignKeySampler + ?Sized> ForeignKeySampler for Box<T> {
    async fn sample(&mut self, table: &str, column: &str) -> anyhow::Result<Option<String>> {
        (**self).sample(table, column).await
    }
}

/// Outcome of resolving one foreign-key column for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum ForeignKeyResolution {
    /// A value sampled from the referenced table
    Sampled(FillValue),

    /// The referenced table is empty and the column is nullable
    Null,

    /// The referenced table is empty and the column is not nullable;
    /// the fill operation cannot continue
    Unsatisfiable,
}

/// Resolves foreign-key columns through a [`ForeignKeySampler`].
pub struct ForeignKeyResolver<S> {
    sampler: S,
    lookups: u64,
}

impl<S: ForeignKeySampler> ForeignKeyResolver<S> {
    /// Wrap a sampler.
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            lookups: 0,
        }
    }

    /// Number of samples taken so far.
    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    /// Unwrap the sampler.
    pub fn into_sampler(self) -> S {
        self.sampler
    }

    /// Resolve `column`, which references `referenced_table.referenced_column`.
    pub async fn resolve(
        &mut self,
        column: &ColumnDescriptor,
        referenced_table: &str,
        referenced_column: &str,
    ) -> anyhow::Result<ForeignKeyResolution> {
        self.lookups += 1;

        match self
            .sampler
            .sample(referenced_table, referenced_column)
            .await?
        {
            Some(sample) => Ok(ForeignKeyResolution::Sampled(FillValue::from_sampled(
                sample,
                &column.declared_type,
            ))),
            None if column.nullable => {
                debug!(
                    "{}.{} is empty; '{}' set to NULL",
                    referenced_table, referenced_column, column.name
                );
                Ok(ForeignKeyResolution::Null)
            }
            None => Ok(ForeignKeyResolution::Unsatisfiable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemorySampler;
    use fill_core::{DeclaredType, ForeignKeyRef, IntegerKind};

    fn dept_id(nullable: bool) -> ColumnDescriptor {
        let col = ColumnDescriptor::new("dept_id", DeclaredType::integer(IntegerKind::Int))
            .references(ForeignKeyRef::new("dept", "id"));
        if nullable {
            col.nullable()
        } else {
            col
        }
    }

    #[tokio::test]
    async fn test_samples_existing_value() {
        let sampler = InMemorySampler::new(42).with_values("dept", "id", ["10", "20", "30"]);
        let mut resolver = ForeignKeyResolver::new(sampler);

        for _ in 0..20 {
            match resolver.resolve(&dept_id(false), "dept", "id").await.unwrap() {
                ForeignKeyResolution::Sampled(FillValue::Int(v)) => {
                    assert!([10, 20, 30].contains(&v))
                }
                other => panic!("Expected sampled Int, got {other:?}"),
            }
        }
        assert_eq!(resolver.lookups(), 20);
    }

    #[tokio::test]
    async fn test_empty_nullable_resolves_to_null() {
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(42));
        let result = resolver.resolve(&dept_id(true), "dept", "id").await.unwrap();
        assert_eq!(result, ForeignKeyResolution::Null);
    }

    #[tokio::test]
    async fn test_empty_not_null_is_unsatisfiable() {
        let mut resolver = ForeignKeyResolver::new(InMemorySampler::new(42));
        let result = resolver.resolve(&dept_id(false), "dept", "id").await.unwrap();
        assert_eq!(result, ForeignKeyResolution::Unsatisfiable);
    }

    #[tokio::test]
    async fn test_text_key_stays_text() {
        let sampler = InMemorySampler::new(1).with_values("country", "code", ["DK"]);
        let mut resolver = ForeignKeyResolver::new(sampler);
        let col = ColumnDescriptor::new("country_code", DeclaredType::Char)
            .with_max_length(2)
            .references(ForeignKeyRef::new("country", "code"));

        let result = resolver.resolve(&col, "country", "code").await.unwrap();
        assert_eq!(
            result,
            ForeignKeyResolution::Sampled(FillValue::Text("DK".into()))
        );
    }
}
