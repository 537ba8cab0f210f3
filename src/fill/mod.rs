//! Fill command handlers.

pub mod logging;
pub mod print;
pub mod run;

use clap::{Args, Subcommand, ValueEnum};
use fill_mysql::MySQLFillArgs;
use fill_populate::CommonFillArgs;
use fill_postgresql::PostgreSQLFillArgs;
use std::path::PathBuf;

pub use logging::mask_connection_password;
pub use print::PrintExecutor;
pub use run::{fill_snapshot, run_fill};

/// Where the rows go.
#[derive(Subcommand)]
pub enum FillSource {
    /// Fill a MySQL table
    #[command(name = "mysql")]
    MySQL {
        #[command(flatten)]
        args: MySQLFillArgs,
    },
    /// Fill a PostgreSQL table
    #[command(name = "postgresql")]
    PostgreSQL {
        #[command(flatten)]
        args: PostgreSQLFillArgs,
    },
    /// Print statements for a table described in a YAML catalog snapshot
    #[command(name = "snapshot")]
    Snapshot {
        #[command(flatten)]
        args: SnapshotFillArgs,
    },
}

/// SQL dialect used to render snapshot statements.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SnapshotDialect {
    #[default]
    Ansi,
    Mysql,
    Postgresql,
}

/// Offline fill arguments.
#[derive(Args, Clone, Debug)]
pub struct SnapshotFillArgs {
    /// Path to the catalog snapshot YAML file
    #[arg(long, short = 'c')]
    pub catalog: PathBuf,

    /// Dialect for the printed statements
    #[arg(long, value_enum, default_value_t = SnapshotDialect::Ansi)]
    pub dialect: SnapshotDialect,

    #[command(flatten)]
    pub common: CommonFillArgs,
}
