//! Schema-driven value synthesis and row assembly.
//!
//! This crate turns a table's column descriptors into syntactically valid
//! `INSERT` statements filled with random, type-correct values. It owns no
//! database connection: catalog reads, foreign-key sampling and statement
//! execution go through the [`CatalogReader`], [`ForeignKeySampler`] and
//! [`StatementExecutor`] traits implemented by the dialect crates.
//!
//! # Architecture
//!
//! ```text
//!  SchemaFillDriver
//!        │  describe_table (once)
//!        ▼
//!  TableDescriptor ──► RowAssembler ── column list (once)
//!                           │
//!                           │ per row, per column
//!                           ▼
//!                      resolve_directive
//!                      ┌────┴──────────────┐
//!                      ▼                   ▼
//!               generators::generate   ForeignKeyResolver ──► ForeignKeySampler
//!                      └────┬──────────────┘
//!                           ▼
//!                    InsertStatement ──► StatementExecutor
//! ```
//!
//! # Example
//!
//! ```rust
//! use fill_core::{AnsiDialect, ColumnDescriptor, DeclaredType, IntegerKind, TableDescriptor};
//! use fill_generator::{FillOptions, InMemoryCatalog, InMemorySampler, RecordingExecutor, SchemaFillDriver};
//!
//! let table = TableDescriptor::new(
//!     "people",
//!     vec![
//!         ColumnDescriptor::new("id", DeclaredType::integer(IntegerKind::Int))
//!             .primary_key()
//!             .auto_generated(),
//!         ColumnDescriptor::new("name", DeclaredType::VarChar).with_max_length(10),
//!     ],
//! )
//! .unwrap();
//!
//! let driver = SchemaFillDriver::new(
//!     InMemoryCatalog::new(vec![table]),
//!     InMemorySampler::new(42),
//!     RecordingExecutor::default(),
//!     AnsiDialect,
//! );
//! let options = FillOptions::new("people", 3).with_seed(42);
//!
//! // `driver.fill(&options).await` inserts three rows naming only `name`.
//! # let _ = (driver, options);
//! ```

pub mod assembler;
pub mod catalog;
pub mod directive;
pub mod driver;
pub mod error;
pub mod executor;
pub mod generators;
pub mod memory;
pub mod options;
pub mod resolver;

// Re-exports for convenience
pub use assembler::{InsertStatement, RowAssembler, RowOutcome};
pub use catalog::CatalogReader;
pub use directive::{resolve_directive, Directive};
pub use driver::{FillReport, FillState, SchemaFillDriver};
pub use error::FillError;
pub use executor::{DryRunExecutor, StatementExecutor};
pub use generators::{generate, CharPool, GeneratorSpec};
pub use memory::{InMemoryCatalog, InMemorySampler, RecordingExecutor};
pub use options::FillOptions;
pub use resolver::{ForeignKeyResolution, ForeignKeyResolver, ForeignKeySampler};
