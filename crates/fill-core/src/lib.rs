//! Core types for the schema-fill engine.
//!
//! This crate provides the foundational types shared by the generator and
//! the dialect-specific crates:
//!
//! - [`DeclaredType`] - Semantic column type as reported by a catalog
//! - [`ColumnDescriptor`] - Metadata for one column of a target table
//! - [`TableDescriptor`] - Ordered descriptor sequence for one table
//! - [`CatalogSnapshot`] - Offline catalog loaded from YAML
//! - [`FillValue`] - A synthesized (or sampled) value for one column
//! - [`SqlDialect`] - Literal and identifier rendering for one SQL dialect
//!
//! # Architecture
//!
//! ```text
//! fill-core (this crate)
//!    │
//!    ├─── fill-generator     (generators, assembler, driver)
//!    │
//!    ├─── fill-mysql         (information_schema reader, MySQL dialect)
//!    └─── fill-postgresql    (information_schema reader, PostgreSQL dialect)
//! ```
//!
//! # Example
//!
//! ```rust
//! use fill_core::{AnsiDialect, FillValue, SqlDialect};
//!
//! let dialect = AnsiDialect;
//! assert_eq!(dialect.render_value(&FillValue::Int(42)), "42");
//! assert_eq!(dialect.render_value(&FillValue::Text("it's".into())), "'it''s'");
//! assert_eq!(dialect.render_value(&FillValue::Null), "NULL");
//! ```

pub mod dialect;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use dialect::{AnsiDialect, SqlDialect};
pub use schema::{CatalogSnapshot, ColumnDescriptor, ForeignKeyRef, SchemaError, TableDescriptor};
pub use types::{DateTimeKind, DeclaredType, IntegerKind};
pub use values::FillValue;
