//! Common CLI argument definitions shared by all fill commands.

use clap::Args;
use fill_generator::options::{
    DEFAULT_LENGTH_CAP, DEFAULT_RANDOMNESS_FACTOR, DEFAULT_VARCHAR_MIN_LENGTH,
};
use fill_generator::FillOptions;

/// Common arguments shared by all fill commands.
#[derive(Args, Clone, Debug)]
pub struct CommonFillArgs {
    /// Table to fill
    #[arg(long, short = 't')]
    pub table: String,

    /// Number of rows to insert
    #[arg(long, default_value_t = 1)]
    pub row_count: u64,

    /// Character pool for strings: 1 = lowercase and space, 2 = mixed case,
    /// 3 = alphanumeric, 4 = printable ASCII
    #[arg(long, default_value_t = DEFAULT_RANDOMNESS_FACTOR)]
    pub randomness_factor: u8,

    /// Shortest generated string length
    #[arg(long, default_value_t = DEFAULT_VARCHAR_MIN_LENGTH)]
    pub varchar_min_length: u32,

    /// Longest value generated for large text and binary columns
    #[arg(long, default_value_t = DEFAULT_LENGTH_CAP)]
    pub text_length_cap: u32,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dry-run mode: print statements instead of executing them
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonFillArgs {
    /// Fill options described by these arguments.
    pub fn to_options(&self) -> FillOptions {
        let options = FillOptions::new(self.table.clone(), self.row_count)
            .with_randomness_factor(self.randomness_factor)
            .with_varchar_min_length(self.varchar_min_length)
            .with_length_cap(self.text_length_cap);

        match self.seed {
            Some(seed) => options.with_seed(seed),
            None => options,
        }
    }
}

impl From<&CommonFillArgs> for FillOptions {
    fn from(args: &CommonFillArgs) -> Self {
        args.to_options()
    }
}
