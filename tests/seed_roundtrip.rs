//! Seeding round trips through a JSONL data directory.
//!
//! 1. Seed users, then memberships referencing them
//! 2. Re-run against the same directory and check earlier rows stay unique
//! 3. Exhaust the membership value space
//! 4. Verify the files contain no duplicate combinations

use seed_combos::jsonl::{read_records, table_path};
use seed_combos::{verify_table, PopulateError, UniquePopulator};
use seed_core::{GeneratedValue, SeedSchema};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;
use unique_combos::ComboError;

const SEED: u64 = 7;

fn load_schema() -> SeedSchema {
    SeedSchema::from_file("tests/fixtures/seed_schema.yaml").expect("Failed to load test schema")
}

fn column_values(dir: &Path, table: &str, column: &str) -> Vec<String> {
    read_records(&table_path(dir, table))
        .unwrap()
        .iter()
        .map(|row| row.get(column).map(GeneratedValue::canonical_key).unwrap())
        .collect()
}

#[test]
fn test_rerun_skips_rows_from_previous_run() {
    let temp_dir = TempDir::new().unwrap();
    let schema = load_schema();

    let first = UniquePopulator::new(schema.clone(), temp_dir.path(), SEED)
        .populate("users", 3)
        .unwrap();
    assert_eq!(first.rows_written, 3);
    assert_eq!(first.retries, 0);

    // Same seed, same UUID stream: the first three candidates are the ids
    // already on disk and must be rejected.
    let second = UniquePopulator::new(schema.clone(), temp_dir.path(), SEED)
        .populate("users", 3)
        .unwrap();
    assert_eq!(second.rows_written, 3);
    assert_eq!(second.retries, 3);

    let ids = column_values(temp_dir.path(), "users", "id");
    assert_eq!(ids.len(), 6);
    assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 6);

    let emails = column_values(temp_dir.path(), "users", "email");
    assert_eq!(emails[3], "\"user_3@example.com\"");

    let report = verify_table(temp_dir.path(), schema.get_table("users").unwrap()).unwrap();
    assert!(report.is_clean());
    assert_eq!(report.rows, 6);
}

#[test]
fn test_references_until_exhausted() {
    let temp_dir = TempDir::new().unwrap();
    let schema = load_schema();
    let populator = UniquePopulator::new(schema.clone(), temp_dir.path(), SEED);

    populator.populate("users", 3).unwrap();
    let metrics = populator.populate("memberships", 6).unwrap();
    assert_eq!(metrics.rows_written, 6);

    let user_ids: HashSet<String> = column_values(temp_dir.path(), "users", "id")
        .into_iter()
        .collect();
    for user_id in column_values(temp_dir.path(), "memberships", "user_id") {
        assert!(user_ids.contains(&user_id), "unknown user {user_id}");
    }

    let err = populator.populate("memberships", 1).unwrap_err();
    match err {
        PopulateError::Combo(ComboError::MaxTriesExceeded {
            generator,
            max_tries,
            columns,
        }) => {
            assert_eq!(generator, "memberships");
            assert_eq!(max_tries, 200);
            assert_eq!(columns, vec!["user_id".to_string(), "role".to_string()]);
        }
        other => panic!("expected MaxTriesExceeded, got {other:?}"),
    }

    let report =
        verify_table(temp_dir.path(), schema.get_table("memberships").unwrap()).unwrap();
    assert_eq!(report.rows, 6);
    assert!(report.is_clean());
}

#[test]
fn test_memberships_need_users() {
    let temp_dir = TempDir::new().unwrap();
    let populator = UniquePopulator::new(load_schema(), temp_dir.path(), SEED);

    let err = populator.populate("memberships", 1).unwrap_err();
    assert!(matches!(err, PopulateError::Build(_)));
    assert!(!table_path(temp_dir.path(), "memberships").exists());
}

#[test]
fn test_verify_flags_hand_written_duplicate() {
    let temp_dir = TempDir::new().unwrap();
    let schema = load_schema();
    let populator = UniquePopulator::new(schema.clone(), temp_dir.path(), SEED);
    populator.populate("users", 2).unwrap();

    let path = table_path(temp_dir.path(), "users");
    let content = std::fs::read_to_string(&path).unwrap();
    let first_line = content.lines().next().unwrap().to_string();
    std::fs::write(&path, format!("{content}{first_line}\n")).unwrap();

    let report = verify_table(temp_dir.path(), schema.get_table("users").unwrap()).unwrap();
    assert_eq!(report.rows, 3);
    assert_eq!(report.duplicates.len(), 1);
    assert_eq!(report.duplicates[0].lines, vec![1, 3]);
}
