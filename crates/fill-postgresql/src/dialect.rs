//! PostgreSQL literal rendering.

use fill_core::{dialect::hex_upper, FillValue, SqlDialect};

/// Double-quoted identifiers, hex `bytea` and EWKT points.
///
/// String literals assume `standard_conforming_strings = on`, the server
/// default since 9.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgreSQLDialect;

impl SqlDialect for PostgreSQLDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn render_bytes(&self, bytes: &[u8]) -> String {
        format!("'\\x{}'", hex_upper(bytes))
    }

    fn render_point(&self, lat: f64, lon: f64, geographic: bool) -> String {
        let wkt = FillValue::point_wkt(lat, lon);
        if geographic {
            self.quote_text(&format!("SRID=4326;{wkt}"))
        } else {
            self.quote_text(&wkt)
        }
    }

    fn render_money(&self, amount: &str) -> String {
        self.quote_text(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bytes() {
        let d = PostgreSQLDialect;
        assert_eq!(d.render_value(&FillValue::Bytes(vec![0xde, 0xad])), r"'\xDEAD'");
    }

    #[test]
    fn test_render_points() {
        let d = PostgreSQLDialect;
        let geography = FillValue::Point {
            lat: 1.5,
            lon: 2.5,
            geographic: true,
        };
        let geometry = FillValue::Point {
            lat: 1.5,
            lon: 2.5,
            geographic: false,
        };
        assert_eq!(d.render_value(&geography), "'SRID=4326;POINT(2.5 1.5)'");
        assert_eq!(d.render_value(&geometry), "'POINT(2.5 1.5)'");
    }

    #[test]
    fn test_render_money_and_text() {
        let d = PostgreSQLDialect;
        assert_eq!(d.render_value(&FillValue::Money("12.34".into())), "'12.34'");
        assert_eq!(d.render_value(&FillValue::Text(r"a\b'c".into())), r"'a\b''c'");
        assert_eq!(d.quote_identifier("sales.orders"), "\"sales\".\"orders\"");
    }
}
