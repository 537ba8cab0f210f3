//! SQL literal rendering.
//!
//! Each dialect crate provides a `SqlDialect` implementation that turns
//! identifiers and [`FillValue`]s into SQL text. The default methods follow
//! ANSI SQL; dialects override only what differs.

use crate::values::FillValue;
use std::fmt::Write;

/// Renders identifiers, literals and insert statements for one SQL dialect.
pub trait SqlDialect: Send + Sync {
    /// Dialect name for logging.
    fn name(&self) -> &'static str;

    /// Character used to quote identifiers.
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Quote a possibly schema-qualified identifier (`schema.table`).
    ///
    /// Each dot-separated part is quoted separately and embedded quote
    /// characters are doubled.
    fn quote_identifier(&self, ident: &str) -> String {
        let q = self.identifier_quote();
        ident
            .split('.')
            .map(|part| {
                let escaped = part.replace(q, &format!("{q}{q}"));
                format!("{q}{escaped}{q}")
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quote a string literal.
    fn quote_text(&self, s: &str) -> String {
        format!("'{}'", s.replace('\'', "''"))
    }

    /// Render a binary literal.
    fn render_bytes(&self, bytes: &[u8]) -> String {
        format!("X'{}'", hex_upper(bytes))
    }

    /// Render a point literal.
    fn render_point(&self, lat: f64, lon: f64, _geographic: bool) -> String {
        self.quote_text(&FillValue::point_wkt(lat, lon))
    }

    /// Render a boolean literal.
    fn render_bool(&self, value: bool) -> String {
        let literal = if value { "TRUE" } else { "FALSE" };
        literal.to_string()
    }

    /// Render a currency amount.
    fn render_money(&self, amount: &str) -> String {
        amount.to_string()
    }

    /// Render any value as a SQL literal.
    fn render_value(&self, value: &FillValue) -> String {
        match value {
            FillValue::Null => "NULL".to_string(),
            FillValue::Int(v) => v.to_string(),
            FillValue::Decimal(v) => v.clone(),
            FillValue::Money(v) => self.render_money(v),
            FillValue::Float(v) if v.is_finite() => v.to_string(),
            FillValue::Float(_) => "NULL".to_string(),
            FillValue::Text(s) => self.quote_text(s),
            FillValue::Date(d) => self.quote_text(&d.format("%Y-%m-%d").to_string()),
            FillValue::DateTime(dt) => {
                self.quote_text(&dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            FillValue::Time(t) => self.quote_text(&t.format("%H:%M:%S").to_string()),
            FillValue::Bytes(b) => self.render_bytes(b),
            FillValue::Point {
                lat,
                lon,
                geographic,
            } => self.render_point(*lat, *lon, *geographic),
            FillValue::Bool(b) => self.render_bool(*b),
            FillValue::Uuid(u) => self.quote_text(&u.to_string()),
        }
    }

    /// Insert statement for a row in which every column is auto-generated.
    fn default_values_insert(&self, quoted_table: &str) -> String {
        format!("INSERT INTO {quoted_table} DEFAULT VALUES")
    }

    /// Assemble an insert statement from already quoted/rendered parts.
    fn insert_statement(&self, quoted_table: &str, columns: &[String], values: &[String]) -> String {
        if columns.is_empty() {
            return self.default_values_insert(quoted_table);
        }
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quoted_table,
            columns.join(", "),
            values.join(", ")
        )
    }
}

/// ANSI SQL rendering, used for offline snapshots and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiDialect;

impl SqlDialect for AnsiDialect {
    fn name(&self) -> &'static str {
        "ansi"
    }
}

/// Upper-case hexadecimal encoding.
pub fn hex_upper(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{b:02X}");
    }
    out
}
