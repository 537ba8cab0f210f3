//! Column descriptor resolution.
//!
//! Maps one column descriptor to the instruction for producing its value in
//! one row. Precedence:
//!
//! 1. auto-generated columns are omitted (this covers the usual
//!    auto-increment surrogate key);
//! 2. foreign-key columns defer to the foreign-key resolver, whatever their
//!    declared width;
//! 3. everything else dispatches on the declared type;
//! 4. types without a generator, and text/binary columns lacking a required
//!    length bound, resolve to a NULL literal.

use crate::generators::GeneratorSpec;
use crate::options::FillOptions;
use fill_core::{ColumnDescriptor, DeclaredType};

/// How one column's value is produced for one row.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// The column takes no part in the insert
    Omit,

    /// Sample a live value from `table.column`
    ForeignKey {
        /// Referenced table
        table: String,
        /// Referenced column
        column: String,
    },

    /// Run a value generator
    Generate(GeneratorSpec),

    /// Emit a NULL literal
    Null,
}

/// Resolve the directive for `column` under `options`.
pub fn resolve_directive(column: &ColumnDescriptor, options: &FillOptions) -> Directive {
    if column.auto_generated {
        return Directive::Omit;
    }

    if let Some((table, referenced_column)) = column.referenced() {
        return Directive::ForeignKey {
            table: table.to_string(),
            column: referenced_column.to_string(),
        };
    }

    let pool = options.char_pool();
    let spec = match &column.declared_type {
        DeclaredType::Integer { kind } => GeneratorSpec::Integer(*kind),

        DeclaredType::Decimal { precision, scale } => GeneratorSpec::Decimal {
            precision: *precision,
            scale: *scale,
        },

        DeclaredType::VarChar => match column.max_length {
            Some(max_length) => GeneratorSpec::BoundedString {
                min_length: options.varchar_min_length.min(max_length),
                max_length,
                pool,
            },
            None => return Directive::Null,
        },

        // Fixed text repeats on every row, so keyed CHAR columns draw from the pool.
        DeclaredType::Char => match column.max_length {
            Some(length) if column.primary_key || column.unique => {
                GeneratorSpec::BoundedString {
                    min_length: length,
                    max_length: length,
                    pool,
                }
            }
            Some(length) => GeneratorSpec::FixedText { length },
            None => return Directive::Null,
        },

        DeclaredType::Text => {
            let max_length = column
                .max_length
                .unwrap_or(options.length_cap)
                .min(options.length_cap);
            GeneratorSpec::BoundedString {
                min_length: options.varchar_min_length.min(max_length),
                max_length,
                pool,
            }
        }

        DeclaredType::Date => GeneratorSpec::Date,

        DeclaredType::DateTime { kind } => GeneratorSpec::DateTime(*kind),

        DeclaredType::Binary => match column.max_length {
            Some(length) => GeneratorSpec::Binary {
                length: length.min(options.length_cap),
            },
            None => return Directive::Null,
        },

        DeclaredType::Money => GeneratorSpec::Money,

        DeclaredType::Float => GeneratorSpec::Float,

        DeclaredType::Time => GeneratorSpec::Time,

        DeclaredType::Geography => GeneratorSpec::Point { geographic: true },

        DeclaredType::Geometry => GeneratorSpec::Point { geographic: false },

        DeclaredType::Boolean => GeneratorSpec::Boolean,

        DeclaredType::Uuid => GeneratorSpec::Uuid,

        DeclaredType::Unsupported { .. } => return Directive::Null,
    };

    Directive::Generate(spec)
}
