//! Value representation for synthesized rows.
//!
//! A `FillValue` is produced either by a value generator or by sampling a
//! referenced table, and is rendered to a SQL literal by a [`SqlDialect`].
//!
//! [`SqlDialect`]: crate::dialect::SqlDialect

use crate::types::DeclaredType;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

/// One column value for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum FillValue {
    /// SQL NULL
    Null,

    /// Integer
    Int(i64),

    /// Exact decimal, already rounded to its scale
    Decimal(String),

    /// Currency amount with two fractional digits
    Money(String),

    /// Floating point
    Float(f64),

    /// Character data
    Text(String),

    /// Date only
    Date(NaiveDate),

    /// Date and time of day
    DateTime(NaiveDateTime),

    /// Time of day
    Time(NaiveTime),

    /// Binary payload
    Bytes(Vec<u8>),

    /// Point; `geographic` selects spheroidal (SRID 4326) over planar
    Point {
        /// Latitude in degrees
        lat: f64,
        /// Longitude in degrees
        lon: f64,
        /// Geography rather than geometry
        geographic: bool,
    },

    /// Boolean
    Bool(bool),

    /// UUID
    Uuid(Uuid),
}

impl FillValue {
    /// Interpret a value sampled as text from a referenced table.
    ///
    /// Integer columns parse the sample so it renders unquoted; anything that
    /// does not parse, and every other type, is kept as text and rendered
    /// quoted, which both MySQL and PostgreSQL coerce on assignment.
    pub fn from_sampled(sample: String, declared_type: &DeclaredType) -> Self {
        match declared_type {
            DeclaredType::Integer { .. } => match sample.trim().parse::<i64>() {
                Ok(v) => Self::Int(v),
                Err(_) => Self::Text(sample),
            },
            DeclaredType::Decimal { .. } if is_plain_decimal(&sample) => Self::Decimal(sample),
            _ => Self::Text(sample),
        }
    }

    /// Well-known-text form of a point value (`POINT(lon lat)`).
    pub fn point_wkt(lat: f64, lon: f64) -> String {
        format!("POINT({lon} {lat})")
    }
}

fn is_plain_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next().unwrap_or("0");
    !int_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && !frac_part.is_empty()
        && frac_part.chars().all(|c| c.is_ascii_digit())
}
