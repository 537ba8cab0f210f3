//! Fill command runner.

use anyhow::Context;
use fill_core::{AnsiDialect, CatalogSnapshot, SqlDialect};
use fill_generator::{
    DryRunExecutor, FillOptions, FillReport, InMemoryCatalog, InMemorySampler, SchemaFillDriver,
    StatementExecutor,
};
use fill_mysql::{MySQLDialect, MySQLFiller};
use fill_postgresql::{PostgreSQLDialect, PostgreSQLFiller};

use super::{mask_connection_password, FillSource, PrintExecutor, SnapshotDialect};

/// Run a fill command and return its report.
pub async fn run_fill(source: FillSource) -> anyhow::Result<FillReport> {
    match source {
        FillSource::MySQL { args } => {
            let options = args.common.to_options();
            tracing::info!(
                "Connecting to MySQL: {}",
                mask_connection_password(&args.mysql_connection_string)
            );

            let filler = MySQLFiller::new(&args.mysql_connection_string)
                .await
                .context("Failed to connect to MySQL")?;

            let result = if args.common.dry_run {
                filler
                    .fill_with_executor(&options, DryRunExecutor::default())
                    .await
                    .map(|(report, _)| report)
            } else {
                filler.fill(&options).await
            };

            if let Err(e) = filler.disconnect().await {
                tracing::warn!("Failed to close MySQL connections: {}", e);
            }
            result.with_context(|| format!("Failed to fill table '{}'", options.target_table))
        }
        FillSource::PostgreSQL { args } => {
            let options = args.common.to_options();
            tracing::info!(
                "Connecting to PostgreSQL: {}",
                mask_connection_password(&args.postgresql_connection_string)
            );

            let filler = PostgreSQLFiller::new(&args.postgresql_connection_string, &args.schema)
                .await
                .context("Failed to connect to PostgreSQL")?;

            let result = if args.common.dry_run {
                filler
                    .fill_with_executor(&options, DryRunExecutor::default())
                    .await
                    .map(|(report, _)| report)
            } else {
                filler.fill(&options).await
            };
            result.with_context(|| format!("Failed to fill table '{}'", options.target_table))
        }
        FillSource::Snapshot { args } => {
            let snapshot = CatalogSnapshot::from_file(&args.catalog).with_context(|| {
                format!("Failed to load catalog snapshot from {:?}", args.catalog)
            })?;
            let options = args.common.to_options();

            let report = if args.common.dry_run {
                fill_snapshot(&snapshot, args.dialect, &options, DryRunExecutor::default())
                    .await?
                    .0
            } else {
                let printer = PrintExecutor::new(std::io::stdout());
                fill_snapshot(&snapshot, args.dialect, &options, printer)
                    .await?
                    .0
            };
            Ok(report)
        }
    }
}

/// Fill a table described by a catalog snapshot.
///
/// Foreign keys sample the snapshot's `existing_values`; the executor
/// receives every assembled statement.
pub async fn fill_snapshot<E: StatementExecutor>(
    snapshot: &CatalogSnapshot,
    dialect: SnapshotDialect,
    options: &FillOptions,
    executor: E,
) -> anyhow::Result<(FillReport, E)> {
    let sampler_seed = options.seed.unwrap_or_else(rand::random);
    let catalog = InMemoryCatalog::from_snapshot(snapshot);
    let sampler = InMemorySampler::from_snapshot(snapshot, sampler_seed);

    match dialect {
        SnapshotDialect::Ansi => drive(catalog, sampler, executor, AnsiDialect, options).await,
        SnapshotDialect::Mysql => drive(catalog, sampler, executor, MySQLDialect, options).await,
        SnapshotDialect::Postgresql => {
            drive(catalog, sampler, executor, PostgreSQLDialect, options).await
        }
    }
}

async fn drive<E, D>(
    catalog: InMemoryCatalog,
    sampler: InMemorySampler,
    executor: E,
    dialect: D,
    options: &FillOptions,
) -> anyhow::Result<(FillReport, E)>
where
    E: StatementExecutor,
    D: SqlDialect + 'static,
{
    let mut driver = SchemaFillDriver::new(catalog, sampler, executor, dialect);
    let report = driver
        .fill(options)
        .await
        .with_context(|| format!("Failed to fill table '{}'", options.target_table))?;
    let (_, _, executor) = driver.into_parts();
    Ok((report, executor))
}
