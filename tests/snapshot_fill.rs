//! End-to-end fills driven by YAML catalog snapshots.

use fill_core::CatalogSnapshot;
use fill_generator::{FillError, FillOptions};
use schema_fill::fill::PrintExecutor;
use schema_fill::{fill_snapshot, SnapshotDialect};
use std::io::Write;

const CATALOG: &str = r#"
tables:
  - name: Dept
    columns:
      - { name: dept_id, type: integer, primary_key: true, auto_generated: true }
      - { name: title, type: var_char, max_length: 40 }
  - name: T
    columns:
      - { name: id, type: integer, primary_key: true, auto_generated: true }
      - { name: name, type: var_char, max_length: 10 }
      - { name: age, type: integer, kind: tiny }
      - { name: dept_id, type: integer, nullable: true, foreign_key: { table: Dept, column: dept_id } }
  - name: Strict
    columns:
      - { name: id, type: integer, primary_key: true, auto_generated: true }
      - { name: dept_id, type: integer, foreign_key: { table: Dept, column: dept_id } }
"#;

fn load(extra: &str) -> CatalogSnapshot {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{CATALOG}{extra}").unwrap();
    CatalogSnapshot::from_file(file.path()).unwrap()
}

fn printed(out: Vec<u8>) -> Vec<String> {
    String::from_utf8(out)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_snapshot_fill_with_existing_references() {
    let snapshot = load("existing_values:\n  Dept:\n    dept_id: [10, 20]\n");
    let options = FillOptions::new("T", 2).with_seed(42);

    let (report, printer) = fill_snapshot(
        &snapshot,
        SnapshotDialect::Ansi,
        &options,
        PrintExecutor::new(Vec::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.rows_emitted, 2);
    let lines = printed(printer.into_inner());
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(line.starts_with("INSERT INTO \"T\" (\"name\", \"age\", \"dept_id\") VALUES ("));
        assert!(line.ends_with(", 10);") || line.ends_with(", 20);"));
    }
}

#[tokio::test]
async fn test_snapshot_fill_nullable_reference_to_empty_table() {
    let snapshot = load("");
    let options = FillOptions::new("T", 3).with_seed(7);

    let (report, printer) = fill_snapshot(
        &snapshot,
        SnapshotDialect::Mysql,
        &options,
        PrintExecutor::new(Vec::new()),
    )
    .await
    .unwrap();

    assert_eq!(report.rows_emitted, 3);
    for line in printed(printer.into_inner()) {
        assert!(line.starts_with("INSERT INTO `T` (`name`, `age`, `dept_id`) VALUES ("));
        assert!(line.ends_with(", NULL);"));
    }
}

#[tokio::test]
async fn test_snapshot_fill_aborts_on_unsatisfiable_reference() {
    let snapshot = load("");
    let options = FillOptions::new("Strict", 5).with_seed(1);

    let err = fill_snapshot(
        &snapshot,
        SnapshotDialect::Postgresql,
        &options,
        PrintExecutor::new(Vec::new()),
    )
    .await
    .unwrap_err();

    match err.downcast_ref::<FillError>() {
        Some(FillError::UnsatisfiableForeignKey {
            referenced_table,
            column,
            rows_emitted,
            ..
        }) => {
            assert_eq!(referenced_table, "Dept");
            assert_eq!(column, "dept_id");
            assert_eq!(*rows_emitted, 0);
        }
        other => panic!("Expected UnsatisfiableForeignKey, got {other:?}"),
    }
}

#[tokio::test]
async fn test_snapshot_fill_is_reproducible() {
    let snapshot = load("existing_values:\n  Dept:\n    dept_id: [1, 2, 3, 4]\n");
    let options = FillOptions::new("T", 10).with_seed(1234);

    let (_, first) = fill_snapshot(
        &snapshot,
        SnapshotDialect::Ansi,
        &options,
        PrintExecutor::new(Vec::new()),
    )
    .await
    .unwrap();
    let (_, second) = fill_snapshot(
        &snapshot,
        SnapshotDialect::Ansi,
        &options,
        PrintExecutor::new(Vec::new()),
    )
    .await
    .unwrap();

    assert_eq!(first.into_inner(), second.into_inner());
}
