//! Column descriptor discovery from `information_schema` and `pg_catalog`.

use async_trait::async_trait;
use fill_core::{
    ColumnDescriptor, DateTimeKind, DeclaredType, ForeignKeyRef, IntegerKind, TableDescriptor,
};
use fill_generator::CatalogReader;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_postgres::{Client, Row};
use tracing::debug;

const COLUMNS_QUERY: &str = "
    SELECT column_name::text, data_type::text, udt_name::text,
           character_maximum_length::int4, numeric_precision::int4, numeric_scale::int4,
           is_nullable::text, column_default::text, is_identity::text, is_generated::text
    FROM information_schema.columns
    WHERE table_schema = $1 AND table_name = $2
    ORDER BY ordinal_position";

const CONSTRAINTS_QUERY: &str = "
    SELECT con.contype::text, a.attname::text, cardinality(con.conkey)::int4,
           ref_ns.nspname::text, ref_cls.relname::text, ref_att.attname::text
    FROM pg_constraint con
    JOIN pg_class cls ON cls.oid = con.conrelid
    JOIN pg_namespace ns ON ns.oid = cls.relnamespace
    CROSS JOIN LATERAL unnest(con.conkey) WITH ORDINALITY AS k(attnum, ord)
    JOIN pg_attribute a ON a.attrelid = con.conrelid AND a.attnum = k.attnum
    LEFT JOIN pg_class ref_cls ON ref_cls.oid = con.confrelid
    LEFT JOIN pg_namespace ref_ns ON ref_ns.oid = ref_cls.relnamespace
    LEFT JOIN pg_attribute ref_att
        ON ref_att.attrelid = con.confrelid AND ref_att.attnum = con.confkey[k.ord]
    WHERE ns.nspname = $1 AND cls.relname = $2 AND con.contype IN ('p', 'u', 'f')
    ORDER BY con.conname, k.ord";

/// One row of the columns query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PgColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub udt_name: String,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub is_identity: Option<String>,
    pub is_generated: Option<String>,
}

impl PgColumnRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            column_name: row.try_get(0)?,
            data_type: row.try_get(1)?,
            udt_name: row.try_get(2)?,
            character_maximum_length: row.try_get(3)?,
            numeric_precision: row.try_get(4)?,
            numeric_scale: row.try_get(5)?,
            is_nullable: row.try_get(6)?,
            column_default: row.try_get(7)?,
            is_identity: row.try_get(8)?,
            is_generated: row.try_get(9)?,
        })
    }

    /// Identity, `serial` and `GENERATED ALWAYS AS (..) STORED` columns.
    fn is_auto_generated(&self) -> bool {
        self.is_identity.as_deref() == Some("YES")
            || self.is_generated.as_deref() == Some("ALWAYS")
            || self
                .column_default
                .as_deref()
                .is_some_and(|d| d.starts_with("nextval("))
    }

    fn to_descriptor(&self) -> ColumnDescriptor {
        let declared_type = postgresql_column_type(
            &self.data_type,
            &self.udt_name,
            self.character_maximum_length,
            self.numeric_precision.map(clamp_u8),
            self.numeric_scale.map(clamp_u8),
        );

        let max_length = match (&declared_type, self.character_maximum_length) {
            (_, Some(length)) => Some(u32::try_from(length).unwrap_or(0)),
            // bytea has no declared bound; the length cap applies.
            (DeclaredType::Binary, None) => Some(u32::MAX),
            _ => None,
        };

        let mut column = ColumnDescriptor::new(self.column_name.clone(), declared_type);
        column.max_length = max_length;
        column.nullable = self.is_nullable == "YES";
        column.auto_generated = self.is_auto_generated();
        column
    }
}

/// One key column of a primary, unique or foreign-key constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct PgConstraintRow {
    /// `p`, `u` or `f`
    pub kind: String,
    pub column_name: String,
    /// Number of columns in the constraint
    pub key_columns: i32,
    pub referenced_schema: Option<String>,
    pub referenced_table: Option<String>,
    pub referenced_column: Option<String>,
}

impl PgConstraintRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            kind: row.try_get(0)?,
            column_name: row.try_get(1)?,
            key_columns: row.try_get(2)?,
            referenced_schema: row.try_get(3)?,
            referenced_table: row.try_get(4)?,
            referenced_column: row.try_get(5)?,
        })
    }

    /// Referenced table, schema-qualified outside `public`.
    fn referenced_table_name(&self) -> Option<String> {
        let table = self.referenced_table.as_ref()?;
        Some(match self.referenced_schema.as_deref() {
            Some(schema) if schema != "public" => format!("{schema}.{table}"),
            _ => table.clone(),
        })
    }
}

fn clamp_u8(v: i32) -> u8 {
    u8::try_from(v.max(0)).unwrap_or(u8::MAX)
}

/// Map a PostgreSQL `data_type`/`udt_name` pair to a declared type.
///
/// PostGIS columns report `USER-DEFINED` and are told apart by `udt_name`.
pub fn postgresql_column_type(
    data_type: &str,
    udt_name: &str,
    character_maximum_length: Option<i32>,
    precision: Option<u8>,
    scale: Option<u8>,
) -> DeclaredType {
    match data_type.to_lowercase().as_str() {
        "smallint" => DeclaredType::integer(IntegerKind::Small),
        "integer" => DeclaredType::integer(IntegerKind::Int),
        "bigint" => DeclaredType::integer(IntegerKind::Big),
        "numeric" => DeclaredType::Decimal {
            precision: precision.unwrap_or(38),
            scale: scale.unwrap_or(10),
        },
        "real" | "double precision" => DeclaredType::Float,
        "money" => DeclaredType::Money,
        "boolean" => DeclaredType::Boolean,

        // Unbounded varchar behaves like text.
        "character varying" if character_maximum_length.is_none() => DeclaredType::Text,
        "character varying" => DeclaredType::VarChar,
        "character" => DeclaredType::Char,
        "text" => DeclaredType::Text,
        "bytea" => DeclaredType::Binary,

        "date" => DeclaredType::Date,
        "timestamp without time zone" | "timestamp with time zone" => DeclaredType::DateTime {
            kind: DateTimeKind::Modern,
        },
        "time without time zone" | "time with time zone" => DeclaredType::Time,

        "uuid" => DeclaredType::Uuid,

        "user-defined" => match udt_name {
            "geography" => DeclaredType::Geography,
            "geometry" => DeclaredType::Geometry,
            other => DeclaredType::unsupported(other),
        },

        other => DeclaredType::unsupported(other),
    }
}

/// Merge the columns and constraints queries into a table descriptor.
///
/// Uniqueness is only recorded for single-column unique constraints; a
/// column in several foreign keys keeps the first one.
pub fn build_table(
    table: &str,
    columns: &[PgColumnRow],
    constraints: &[PgConstraintRow],
) -> anyhow::Result<Option<TableDescriptor>> {
    if columns.is_empty() {
        return Ok(None);
    }

    let mut descriptors: Vec<ColumnDescriptor> =
        columns.iter().map(PgColumnRow::to_descriptor).collect();

    for constraint in constraints {
        let Some(column) = descriptors
            .iter_mut()
            .find(|c| c.name == constraint.column_name)
        else {
            continue;
        };

        match constraint.kind.as_str() {
            "p" => column.primary_key = true,
            "u" if constraint.key_columns == 1 => column.unique = true,
            "f" if column.foreign_key.is_none() => {
                if let Some(referenced_table) = constraint.referenced_table_name() {
                    column.foreign_key = Some(match &constraint.referenced_column {
                        Some(referenced) => ForeignKeyRef::new(referenced_table, referenced.clone()),
                        None => ForeignKeyRef::same_name(referenced_table),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(Some(TableDescriptor::new(table, descriptors)?))
}

/// Catalog reader over a shared PostgreSQL client.
pub struct PostgreSQLCatalogReader {
    client: Arc<Mutex<Client>>,
    default_schema: String,
}

impl PostgreSQLCatalogReader {
    /// Unqualified table names are looked up in `default_schema`.
    pub fn new(client: Arc<Mutex<Client>>, default_schema: impl Into<String>) -> Self {
        Self {
            client,
            default_schema: default_schema.into(),
        }
    }

    /// Split `table` into schema and name, and the name statements should use.
    fn resolve_name<'a>(&'a self, table: &'a str) -> (&'a str, &'a str, String) {
        match table.split_once('.') {
            Some((schema, name)) => (schema, name, table.to_string()),
            None if self.default_schema == "public" => {
                (self.default_schema.as_str(), table, table.to_string())
            }
            None => (
                self.default_schema.as_str(),
                table,
                format!("{}.{}", self.default_schema, table),
            ),
        }
    }
}

#[async_trait]
impl CatalogReader for PostgreSQLCatalogReader {
    async fn describe_table(&mut self, table: &str) -> anyhow::Result<Option<TableDescriptor>> {
        let (schema, name, qualified) = self.resolve_name(table);
        let client = self.client.lock().await;

        let column_rows = client.query(COLUMNS_QUERY, &[&schema, &name]).await?;
        let constraint_rows = client.query(CONSTRAINTS_QUERY, &[&schema, &name]).await?;
        debug!(
            "Catalog returned {} columns and {} key columns for '{}'",
            column_rows.len(),
            constraint_rows.len(),
            qualified
        );

        let columns = column_rows
            .iter()
            .map(PgColumnRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        let constraints = constraint_rows
            .iter()
            .map(PgConstraintRow::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        build_table(&qualified, &columns, &constraints)
    }
}
