//! Column and table descriptors.
//!
//! A `TableDescriptor` is the ordered, read-only snapshot of a table's column
//! metadata taken once per fill operation. Column order is significant: the
//! column list and every row's value list are built by iterating the same
//! sequence, so position `i` of one always corresponds to position `i` of the
//! other.
//!
//! `CatalogSnapshot` is the offline form: a YAML document describing tables
//! (and optionally the values already present in referenced tables) that can
//! stand in for a live catalog.

use crate::types::DeclaredType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in snapshot
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Two columns of one table share a name
    #[error("Column '{column}' appears more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },
}

/// Reference from a foreign-key column to the column it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Referenced table
    pub table: String,

    /// Referenced column. When absent the referencing column's own name is
    /// assumed, which only holds for schemas that name keys identically on
    /// both sides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl ForeignKeyRef {
    /// Reference to `table.column`.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: Some(column.into()),
        }
    }

    /// Reference to `table` with the column name left to the same-name rule.
    pub fn same_name(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: None,
        }
    }
}

/// Metadata for one column of a target table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name, unique within its table
    pub name: String,

    /// Semantic column type
    #[serde(flatten)]
    pub declared_type: DeclaredType,

    /// Length bound for text and binary columns; `None` means unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    /// Whether this column accepts NULL
    #[serde(default)]
    pub nullable: bool,

    /// Whether this column is (part of) the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Whether this column carries a single-column unique constraint
    #[serde(default)]
    pub unique: bool,

    /// Identity, auto-increment, serial or computed column; never assigned
    #[serde(default)]
    pub auto_generated: bool,

    /// Foreign-key target, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnDescriptor {
    /// Create a non-nullable, non-key column.
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            max_length: None,
            nullable: false,
            primary_key: false,
            unique: false,
            auto_generated: false,
            foreign_key: None,
        }
    }

    /// Set the length bound.
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the column unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the column auto-generated.
    pub fn auto_generated(mut self) -> Self {
        self.auto_generated = true;
        self
    }

    /// Attach a foreign-key reference.
    pub fn references(mut self, reference: ForeignKeyRef) -> Self {
        self.foreign_key = Some(reference);
        self
    }

    /// Whether this column is a foreign key.
    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key.is_some()
    }

    /// Whether the fill assigns a value to this column at all.
    pub fn is_insertable(&self) -> bool {
        !self.auto_generated
    }

    /// Referenced `(table, column)` pair for a foreign-key column.
    pub fn referenced(&self) -> Option<(&str, &str)> {
        self.foreign_key.as_ref().map(|fk| {
            (
                fk.table.as_str(),
                fk.column.as_deref().unwrap_or(self.name.as_str()),
            )
        })
    }
}

/// Ordered column descriptors of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table identifier (optionally schema-qualified, e.g. `sales.orders`)
    pub name: String,

    /// Columns in catalog ordinal order
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    /// Create a table descriptor, rejecting duplicate column names.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnDescriptor>,
    ) -> Result<Self, SchemaError> {
        let table = Self {
            name: name.into(),
            columns,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check that column names are unique.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns that receive a value, in descriptor order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_insertable())
    }
}

/// Offline catalog loaded from YAML.
///
/// ```yaml
/// tables:
///   - name: dept
///     columns:
///       - { name: id, type: integer, primary_key: true, auto_generated: true }
///   - name: employee
///     columns:
///       - { name: id, type: integer, primary_key: true, auto_generated: true }
///       - { name: name, type: var_char, max_length: 10 }
///       - { name: dept_id, type: integer, nullable: true, foreign_key: { table: dept, column: id } }
/// existing_values:
///   dept:
///     id: [1, 2, 3]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Table descriptors
    #[serde(default)]
    pub tables: Vec<TableDescriptor>,

    /// Values already present in tables, keyed by table then column
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub existing_values: BTreeMap<String, BTreeMap<String, Vec<serde_yaml::Value>>>,
}

impl CatalogSnapshot {
    /// Parse a snapshot from YAML and validate every table.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let snapshot: Self = serde_yaml::from_str(yaml)?;
        for table in &snapshot.tables {
            table.validate()?;
        }
        Ok(snapshot)
    }

    /// Load a snapshot from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Get a table by name.
    pub fn get_table(&self, name: &str) -> Option<&TableDescriptor> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Names of all described tables.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Existing values of `table.column` rendered as text.
    ///
    /// Non-scalar YAML entries and nulls are skipped.
    pub fn existing_values(&self, table: &str, column: &str) -> Vec<String> {
        self.existing_values
            .get(table)
            .and_then(|columns| columns.get(column))
            .map(|values| values.iter().filter_map(scalar_to_string).collect())
            .unwrap_or_default()
    }
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
