//! Fill operation configuration.

use crate::error::FillError;
use crate::generators::CharPool;

/// Default randomness factor (lowercase letters and space).
pub const DEFAULT_RANDOMNESS_FACTOR: u8 = 1;

/// Default shortest length for variable-length strings.
pub const DEFAULT_VARCHAR_MIN_LENGTH: u32 = 1;

/// Default bound for large text and binary columns.
pub const DEFAULT_LENGTH_CAP: u32 = 255;

/// Options for one fill operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    /// Table to insert into
    pub target_table: String,

    /// Number of rows to insert
    pub row_count: u64,

    /// Character pool selector (1-4); other values fall back to 1
    pub randomness_factor: u8,

    /// Shortest generated string; lowered to a column's max length when larger
    pub varchar_min_length: u32,

    /// Longest value generated for large text and binary columns
    pub length_cap: u32,

    /// Seed for reproducible runs; OS entropy when absent
    pub seed: Option<u64>,
}

impl FillOptions {
    /// Options for `row_count` rows into `target_table` with defaults for the rest.
    pub fn new(target_table: impl Into<String>, row_count: u64) -> Self {
        Self {
            target_table: target_table.into(),
            row_count,
            randomness_factor: DEFAULT_RANDOMNESS_FACTOR,
            varchar_min_length: DEFAULT_VARCHAR_MIN_LENGTH,
            length_cap: DEFAULT_LENGTH_CAP,
            seed: None,
        }
    }

    /// Set the randomness factor.
    pub fn with_randomness_factor(mut self, factor: u8) -> Self {
        self.randomness_factor = factor;
        self
    }

    /// Set the shortest generated string length.
    pub fn with_varchar_min_length(mut self, min_length: u32) -> Self {
        self.varchar_min_length = min_length;
        self
    }

    /// Set the bound for large text and binary columns.
    pub fn with_length_cap(mut self, cap: u32) -> Self {
        self.length_cap = cap;
        self
    }

    /// Seed the random number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Character pool selected by the randomness factor.
    pub fn char_pool(&self) -> CharPool {
        CharPool::from_factor(self.randomness_factor)
    }

    /// Reject options no fill can run with.
    pub fn validate(&self) -> Result<(), FillError> {
        if self.target_table.trim().is_empty() {
            return Err(FillError::InvalidOptions(
                "target table must not be empty".to_string(),
            ));
        }
        if self.row_count == 0 {
            return Err(FillError::InvalidOptions(
                "row count must be positive".to_string(),
            ));
        }
        if self.varchar_min_length == 0 {
            return Err(FillError::InvalidOptions(
                "varchar minimum length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
