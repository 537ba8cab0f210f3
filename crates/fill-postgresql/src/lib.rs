//! PostgreSQL backend for schema-fill.
//!
//! Reads column descriptors from `information_schema.columns`, key and
//! foreign-key constraints from `pg_constraint`, samples referenced tables
//! and executes the assembled statements over a shared `tokio-postgres`
//! client.

pub mod args;
pub mod catalog;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod filler;
pub mod sampler;

pub use args::PostgreSQLFillArgs;
pub use catalog::{postgresql_column_type, PostgreSQLCatalogReader};
pub use dialect::PostgreSQLDialect;
pub use error::PostgreSQLFillError;
pub use executor::PostgreSQLExecutor;
pub use filler::PostgreSQLFiller;
pub use sampler::PostgreSQLSampler;
