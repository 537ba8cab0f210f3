//! Column descriptor discovery from `INFORMATION_SCHEMA`.

use async_trait::async_trait;
use fill_core::{
    ColumnDescriptor, DateTimeKind, DeclaredType, ForeignKeyRef, IntegerKind, TableDescriptor,
};
use fill_generator::CatalogReader;
use mysql_async::prelude::*;
use mysql_async::{Pool, Row};
use tracing::debug;

const COLUMNS_QUERY: &str = "
    SELECT c.COLUMN_NAME, c.DATA_TYPE, c.COLUMN_TYPE, c.CHARACTER_MAXIMUM_LENGTH,
           c.NUMERIC_PRECISION, c.NUMERIC_SCALE, c.IS_NULLABLE, c.COLUMN_KEY, c.EXTRA,
           k.REFERENCED_TABLE_NAME, k.REFERENCED_COLUMN_NAME,
           c.TABLE_SCHEMA, k.REFERENCED_TABLE_SCHEMA
    FROM INFORMATION_SCHEMA.COLUMNS c
    LEFT JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE k
        ON k.TABLE_SCHEMA = c.TABLE_SCHEMA
        AND k.TABLE_NAME = c.TABLE_NAME
        AND k.COLUMN_NAME = c.COLUMN_NAME
        AND k.REFERENCED_TABLE_NAME IS NOT NULL
    WHERE c.TABLE_SCHEMA = COALESCE(?, DATABASE())
        AND c.TABLE_NAME = ?
    ORDER BY c.ORDINAL_POSITION";

/// One row of the columns query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MySQLColumnRow {
    pub column_name: String,
    pub data_type: String,
    pub column_type: String,
    pub character_maximum_length: Option<u64>,
    pub numeric_precision: Option<u64>,
    pub numeric_scale: Option<u64>,
    pub is_nullable: String,
    pub column_key: String,
    pub extra: String,
    pub referenced_table: Option<String>,
    pub referenced_column: Option<String>,
    pub table_schema: String,
    pub referenced_schema: Option<String>,
}

impl MySQLColumnRow {
    fn from_row(row: &Row) -> anyhow::Result<Self> {
        let text = |idx: usize, what: &str| -> anyhow::Result<String> {
            row.get::<Option<String>, _>(idx)
                .flatten()
                .ok_or_else(|| anyhow::anyhow!("Missing {what}"))
        };

        Ok(Self {
            column_name: text(0, "column name")?,
            data_type: text(1, "data type")?,
            column_type: text(2, "column type")?,
            character_maximum_length: row.get::<Option<u64>, _>(3).unwrap_or(None),
            numeric_precision: row.get::<Option<u64>, _>(4).unwrap_or(None),
            numeric_scale: row.get::<Option<u64>, _>(5).unwrap_or(None),
            is_nullable: text(6, "nullability")?,
            column_key: row.get::<Option<String>, _>(7).flatten().unwrap_or_default(),
            extra: row.get::<Option<String>, _>(8).flatten().unwrap_or_default(),
            referenced_table: row.get::<Option<String>, _>(9).unwrap_or(None),
            referenced_column: row.get::<Option<String>, _>(10).unwrap_or(None),
            table_schema: row.get::<Option<String>, _>(11).flatten().unwrap_or_default(),
            referenced_schema: row.get::<Option<String>, _>(12).unwrap_or(None),
        })
    }

    /// Identity and generated columns never receive a value.
    ///
    /// `DEFAULT_GENERATED` (a `CURRENT_TIMESTAMP` default) is still writable.
    fn is_auto_generated(&self) -> bool {
        let extra = self.extra.to_lowercase();
        extra.contains("auto_increment")
            || extra.contains("virtual generated")
            || extra.contains("stored generated")
    }

    /// Build the descriptor for this column.
    ///
    /// `unqualified_schema` is the schema an unqualified table name resolves
    /// to when sampled. A referenced table in any other schema, or in any
    /// schema when that is unknown, is stored as `schema.table`.
    pub fn to_descriptor(&self, unqualified_schema: Option<&str>) -> ColumnDescriptor {
        let precision = self.numeric_precision.map(clamp_u8);
        let scale = self.numeric_scale.map(clamp_u8);
        let declared_type =
            mysql_column_type(&self.data_type, &self.column_type, precision, scale);

        let mut column = ColumnDescriptor::new(self.column_name.clone(), declared_type);
        if let Some(length) = self.character_maximum_length {
            column = column.with_max_length(u32::try_from(length).unwrap_or(u32::MAX));
        }
        column.nullable = self.is_nullable.eq_ignore_ascii_case("YES");
        column.primary_key = self.column_key == "PRI";
        column.unique = self.column_key == "UNI";
        column.auto_generated = self.is_auto_generated();

        if let Some(table) = &self.referenced_table {
            let table = match &self.referenced_schema {
                Some(schema) if unqualified_schema != Some(schema.as_str()) => {
                    format!("{schema}.{table}")
                }
                _ => table.clone(),
            };
            column.foreign_key = Some(match &self.referenced_column {
                Some(referenced) => ForeignKeyRef::new(table, referenced.clone()),
                None => ForeignKeyRef::same_name(table),
            });
        }
        column
    }
}

fn clamp_u8(v: u64) -> u8 {
    u8::try_from(v).unwrap_or(u8::MAX)
}

/// Map a MySQL `DATA_TYPE`/`COLUMN_TYPE` pair to a declared type.
///
/// `TINYINT(1)` is MySQL's boolean. Signed `TINYINT` uses the signed tiny
/// kind so generated values stay within 127.
pub fn mysql_column_type(
    data_type: &str,
    column_type: &str,
    precision: Option<u8>,
    scale: Option<u8>,
) -> DeclaredType {
    let column_type = column_type.to_lowercase();

    match data_type.to_lowercase().as_str() {
        "tinyint" if column_type.starts_with("tinyint(1)") => DeclaredType::Boolean,
        "tinyint" if column_type.contains("unsigned") => DeclaredType::integer(IntegerKind::Tiny),
        "tinyint" => DeclaredType::integer(IntegerKind::SignedTiny),
        "smallint" => DeclaredType::integer(IntegerKind::Small),
        "mediumint" => DeclaredType::integer(IntegerKind::Medium),
        "int" | "integer" => DeclaredType::integer(IntegerKind::Int),
        "bigint" => DeclaredType::integer(IntegerKind::Big),
        "boolean" | "bool" => DeclaredType::Boolean,

        "decimal" | "numeric" => DeclaredType::Decimal {
            precision: precision.unwrap_or(10),
            scale: scale.unwrap_or(0),
        },
        "float" | "double" | "real" => DeclaredType::Float,

        "varchar" => DeclaredType::VarChar,
        "char" => DeclaredType::Char,
        "tinytext" | "text" | "mediumtext" | "longtext" => DeclaredType::Text,
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
            DeclaredType::Binary
        }

        "date" => DeclaredType::Date,
        // DATETIME is only guaranteed from year 1000.
        "datetime" => DeclaredType::DateTime {
            kind: DateTimeKind::Legacy,
        },
        "timestamp" => DeclaredType::DateTime {
            kind: DateTimeKind::UnixTimestamp,
        },
        "time" => DeclaredType::Time,

        "point" | "geometry" => DeclaredType::Geometry,

        other => DeclaredType::unsupported(other),
    }
}

/// Build a table descriptor from the rows of the columns query.
///
/// A column that takes part in several foreign keys yields one row per key;
/// the first one wins. No rows means the table does not exist.
///
/// Unqualified references are sampled against `DATABASE()`. That is the
/// target's own schema only when `table` carries no schema prefix.
pub fn build_table(
    table: &str,
    rows: &[MySQLColumnRow],
) -> anyhow::Result<Option<TableDescriptor>> {
    if rows.is_empty() {
        return Ok(None);
    }

    let explicit_schema = split_qualified(table).0.is_some();

    let mut columns: Vec<ColumnDescriptor> = Vec::with_capacity(rows.len());
    for row in rows {
        if columns.iter().any(|c| c.name == row.column_name) {
            continue;
        }
        let unqualified_schema = (!explicit_schema).then_some(row.table_schema.as_str());
        columns.push(row.to_descriptor(unqualified_schema));
    }

    Ok(Some(TableDescriptor::new(table, columns)?))
}

/// Split `schema.table` into its parts; unqualified names use `DATABASE()`.
fn split_qualified(table: &str) -> (Option<&str>, &str) {
    match table.split_once('.') {
        Some((schema, name)) => (Some(schema), name),
        None => (None, table),
    }
}

/// Catalog reader over a MySQL connection pool.
#[derive(Debug, Clone)]
pub struct MySQLCatalogReader {
    pool: Pool,
}

impl MySQLCatalogReader {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogReader for MySQLCatalogReader {
    async fn describe_table(&mut self, table: &str) -> anyhow::Result<Option<TableDescriptor>> {
        let (schema, name) = split_qualified(table);
        let mut conn = self.pool.get_conn().await?;

        let rows: Vec<Row> = conn
            .exec(COLUMNS_QUERY, (schema.map(str::to_string), name.to_string()))
            .await?;
        debug!("Catalog returned {} rows for '{}'", rows.len(), table);

        let rows = rows
            .iter()
            .map(MySQLColumnRow::from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;
        build_table(table, &rows)
    }
}
