//! MySQL literal rendering.

use fill_core::{FillValue, SqlDialect};

/// Backtick identifiers, backslash-aware string escaping and
/// `ST_GeomFromText` points.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLDialect;

impl SqlDialect for MySQLDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn quote_text(&self, s: &str) -> String {
        // Backslash is an escape character unless NO_BACKSLASH_ESCAPES is set.
        format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn render_point(&self, lat: f64, lon: f64, _geographic: bool) -> String {
        format!(
            "ST_GeomFromText({})",
            self.quote_text(&FillValue::point_wkt(lat, lon))
        )
    }

    fn default_values_insert(&self, quoted_table: &str) -> String {
        format!("INSERT INTO {quoted_table} () VALUES ()")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier() {
        let d = MySQLDialect;
        assert_eq!(d.quote_identifier("employee"), "`employee`");
        assert_eq!(d.quote_identifier("hr.employee"), "`hr`.`employee`");
        assert_eq!(d.quote_identifier("odd`name"), "`odd``name`");
    }

    #[test]
    fn test_quote_text_escapes_backslash() {
        let d = MySQLDialect;
        assert_eq!(d.quote_text(r"a\b'c"), r"'a\\b''c'");
    }

    #[test]
    fn test_render_point() {
        let d = MySQLDialect;
        let value = FillValue::Point {
            lat: 10.5,
            lon: -20.25,
            geographic: false,
        };
        assert_eq!(
            d.render_value(&value),
            "ST_GeomFromText('POINT(-20.25 10.5)')"
        );
    }

    #[test]
    fn test_default_values_insert() {
        let d = MySQLDialect;
        assert_eq!(
            d.insert_statement("`counters`", &[], &[]),
            "INSERT INTO `counters` () VALUES ()"
        );
    }
}
