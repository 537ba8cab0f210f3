//! Declared column types.
//!
//! This module defines `DeclaredType`, the semantic type tag a catalog reader
//! assigns to each column. Dialect crates map their native catalog type names
//! onto this universe; the generator dispatches on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a column, as reported by a catalog reader.
///
/// Length bounds are not part of the type; they travel on the descriptor as
/// `max_length` so that variable text, fixed text and binary columns share the
/// same constraint field.
///
/// # YAML Format
///
/// The type is flattened into the column entry and selected by `type`:
///
/// ```yaml
/// - name: age
///   type: integer
///   kind: tiny
/// - name: price
///   type: decimal
///   precision: 10
///   scale: 2
/// - name: title
///   type: var_char
///   max_length: 80
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeclaredType {
    /// Integer family (tiny through big)
    Integer {
        /// Width of the integer
        #[serde(default)]
        kind: IntegerKind,
    },

    /// Exact decimal with precision and scale
    Decimal {
        /// Total number of digits
        precision: u8,
        /// Number of digits after the decimal point
        #[serde(default)]
        scale: u8,
    },

    /// Variable-length character string bounded by `max_length`
    VarChar,

    /// Fixed-length character string of `max_length` characters
    Char,

    /// Large text (TEXT, CLOB)
    Text,

    /// Date only
    Date,

    /// Date and time of day
    DateTime {
        /// Range family of the column
        #[serde(default)]
        kind: DateTimeKind,
    },

    /// Binary family (BINARY, VARBINARY, BLOB, BYTEA)
    Binary,

    /// Currency amount
    Money,

    /// Floating point (FLOAT, REAL, DOUBLE)
    Float,

    /// Time of day
    Time,

    /// Geographic point (latitude/longitude on a spheroid)
    Geography,

    /// Planar geometry point
    Geometry,

    /// Boolean
    Boolean,

    /// UUID
    Uuid,

    /// A catalog type with no matching generator; always filled with NULL
    Unsupported {
        /// Native type name as reported by the catalog
        type_name: String,
    },
}

impl DeclaredType {
    /// Shorthand for an integer column of the given kind.
    pub fn integer(kind: IntegerKind) -> Self {
        Self::Integer { kind }
    }

    /// Shorthand for an unsupported type.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::Unsupported {
            type_name: type_name.into(),
        }
    }

    /// Check if values of this type render as unquoted numeric literals.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Integer { .. } | Self::Decimal { .. } | Self::Money | Self::Float
        )
    }
}

impl Default for DeclaredType {
    fn default() -> Self {
        Self::Integer {
            kind: IntegerKind::default(),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer { kind } => write!(f, "integer({kind:?})"),
            Self::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            Self::VarChar => f.write_str("varchar"),
            Self::Char => f.write_str("char"),
            Self::Text => f.write_str("text"),
            Self::Date => f.write_str("date"),
            Self::DateTime { kind } => write!(f, "datetime({kind:?})"),
            Self::Binary => f.write_str("binary"),
            Self::Money => f.write_str("money"),
            Self::Float => f.write_str("float"),
            Self::Time => f.write_str("time"),
            Self::Geography => f.write_str("geography"),
            Self::Geometry => f.write_str("geometry"),
            Self::Boolean => f.write_str("boolean"),
            Self::Uuid => f.write_str("uuid"),
            Self::Unsupported { type_name } => write!(f, "unsupported({type_name})"),
        }
    }
}

/// Integer widths.
///
/// Generated integers are never negative: each kind draws from
/// `[0, max_value()]`, the positive half of the native range (or the full
/// range for the unsigned tiny kind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerKind {
    /// 8-bit unsigned-style (SQL Server TINYINT, MySQL TINYINT UNSIGNED)
    Tiny,
    /// 8-bit signed (MySQL TINYINT)
    SignedTiny,
    /// 16-bit
    Small,
    /// 24-bit (MySQL MEDIUMINT)
    Medium,
    /// 32-bit
    #[default]
    Int,
    /// 64-bit
    Big,
}

impl IntegerKind {
    /// Largest value the generator may produce for this kind.
    pub fn max_value(self) -> i64 {
        match self {
            Self::Tiny => u8::MAX as i64,
            Self::SignedTiny => i8::MAX as i64,
            Self::Small => i16::MAX as i64,
            Self::Medium => 8_388_607,
            Self::Int => i32::MAX as i64,
            Self::Big => i64::MAX,
        }
    }
}

/// Range families for date/time columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateTimeKind {
    /// Legacy DATETIME with a 1753-01-01 floor
    Legacy,
    /// Modern DATETIME2 / TIMESTAMP spanning the proleptic calendar
    #[default]
    Modern,
    /// 32-bit UNIX timestamp (MySQL TIMESTAMP)
    UnixTimestamp,
}

impl DateTimeKind {
    /// Default `(min, max)` dates for this kind.
    pub fn default_bounds(self) -> (NaiveDate, NaiveDate) {
        match self {
            Self::Legacy => (ymd(1753, 1, 1), far_future()),
            Self::Modern => (proleptic_min(), far_future()),
            Self::UnixTimestamp => (ymd(1970, 1, 2), ymd(2038, 1, 18)),
        }
    }
}

/// First day of the proleptic Gregorian calendar used by date columns.
pub fn proleptic_min() -> NaiveDate {
    ymd(1, 1, 1)
}

/// Upper date bound shared by every kind that has no narrower native limit.
pub fn far_future() -> NaiveDate {
    ymd(9999, 12, 31)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}
