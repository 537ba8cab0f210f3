//! Common types shared by the schema-fill commands.
//!
//! This crate provides the argument set every fill command accepts (MySQL,
//! PostgreSQL and offline snapshots) and its conversion into
//! [`fill_generator::FillOptions`].

pub mod args;

pub use args::CommonFillArgs;
