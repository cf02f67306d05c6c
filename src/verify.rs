//! Checks table files for repeated unique column combinations.

use crate::jsonl::{read_numbered_records, table_path, JsonlError};
use indexmap::IndexMap;
use seed_core::SeedTableDefinition;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};
use unique_combos::Combination;

/// Errors that can occur during verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Table has no unique columns to check.
    #[error("Table '{0}' has no unique columns")]
    NoUniqueColumns(String),

    /// Table file error.
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

/// A combination found on more than one line.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateCombination {
    pub combination: Combination,
    /// 1-based line numbers, ascending
    pub lines: Vec<usize>,
}

/// Result of verifying one table.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub table: String,
    pub rows: u64,
    pub duplicates: Vec<DuplicateCombination>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty()
    }

    /// Rows that repeat an earlier row.
    pub fn duplicate_rows(&self) -> u64 {
        self.duplicates
            .iter()
            .map(|d| d.lines.len() as u64 - 1)
            .sum()
    }
}

/// Scan the file of `table` in `dir` for rows sharing a unique combination.
pub fn verify_table(dir: &Path, table: &SeedTableDefinition) -> Result<VerifyReport, VerifyError> {
    let columns = table.unique_column_names();
    if columns.is_empty() {
        return Err(VerifyError::NoUniqueColumns(table.name.clone()));
    }

    let path = table_path(dir, &table.name);
    let records = read_numbered_records(&path)?;
    let rows = records.len() as u64;

    let mut groups: IndexMap<String, DuplicateCombination> = IndexMap::new();
    for (line, record) in records {
        let combination = Combination::project(&record, &columns);
        groups
            .entry(combination.canonical_key(&columns))
            .or_insert_with(|| DuplicateCombination {
                combination,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }

    let duplicates: Vec<DuplicateCombination> = groups
        .into_values()
        .filter(|group| group.lines.len() > 1)
        .collect();

    let report = VerifyReport {
        table: table.name.clone(),
        rows,
        duplicates,
    };

    if report.is_clean() {
        info!("Table '{}': {} rows, no duplicates", report.table, rows);
    } else {
        warn!(
            "Table '{}': {} rows, {} duplicated combinations ({} extra rows)",
            report.table,
            rows,
            report.duplicates.len(),
            report.duplicate_rows()
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::{GeneratedValue, SeedSchema};

    const SCHEMA: &str = r#"
tables:
  - name: memberships
    unique:
      - name: user_id
        generator: { type: int_range, min: 1, max: 3 }
      - name: role
        generator: { type: one_of, values: [admin, member] }
    fields:
      - name: note
        generator: { type: static, value: x }
  - name: logs
    fields:
      - name: message
        generator: { type: static, value: hi }
"#;

    fn schema() -> SeedSchema {
        SeedSchema::from_yaml(SCHEMA).unwrap()
    }

    #[test]
    fn test_clean_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            table_path(dir.path(), "memberships"),
            "{\"user_id\":1,\"role\":\"admin\",\"note\":\"a\"}\n\
             {\"user_id\":1,\"role\":\"member\",\"note\":\"a\"}\n",
        )
        .unwrap();

        let schema = schema();
        let report = verify_table(dir.path(), schema.get_table("memberships").unwrap()).unwrap();
        assert_eq!(report.rows, 2);
        assert!(report.is_clean());
    }

    #[test]
    fn test_duplicates_reported_with_lines() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            table_path(dir.path(), "memberships"),
            "{\"role\":\"admin\",\"user_id\":2,\"note\":\"a\"}\n\
             {\"user_id\":1,\"role\":\"admin\",\"note\":\"b\"}\n\
             {\"user_id\":2,\"role\":\"admin\",\"note\":\"c\"}\n\
             {\"user_id\":2,\"role\":\"admin\",\"note\":\"d\"}\n",
        )
        .unwrap();

        let schema = schema();
        let report = verify_table(dir.path(), schema.get_table("memberships").unwrap()).unwrap();
        assert_eq!(report.rows, 4);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.duplicate_rows(), 2);

        let dup = &report.duplicates[0];
        assert_eq!(dup.lines, vec![1, 3, 4]);
        assert_eq!(dup.combination.get("user_id"), Some(&GeneratedValue::Int64(2)));
    }

    #[test]
    fn test_missing_file_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema();
        let report = verify_table(dir.path(), schema.get_table("memberships").unwrap()).unwrap();
        assert_eq!(report.rows, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_table_without_unique_columns() {
        let dir = tempfile::tempdir().unwrap();
        let schema = schema();
        let err = verify_table(dir.path(), schema.get_table("logs").unwrap()).unwrap_err();
        assert!(matches!(err, VerifyError::NoUniqueColumns(_)));
    }
}
