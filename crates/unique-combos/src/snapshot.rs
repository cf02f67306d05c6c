//! Access to the rows already present in a backing table.

use seed_core::Record;
use std::collections::HashMap;

/// Supplies the existing rows of a table.
pub trait SnapshotSource {
    /// Return every row of `table`, projected onto `columns`.
    ///
    /// A table with no rows (or no storage yet) yields an empty list.
    fn fetch(&mut self, table: &str, columns: &[String]) -> anyhow::Result<Vec<Record>>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for &mut S {
    fn fetch(&mut self, table: &str, columns: &[String]) -> anyhow::Result<Vec<Record>> {
        (**self).fetch(table, columns)
    }
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    fn fetch(&mut self, table: &str, columns: &[String]) -> anyhow::Result<Vec<Record>> {
        (**self).fetch(table, columns)
    }
}

/// Snapshot source holding tables in memory. Counts fetches.
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshot {
    tables: HashMap<String, Vec<Record>>,
    fetches: usize,
}

impl InMemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows of `table`.
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<Record>) -> Self {
        self.tables.insert(table.into(), rows);
        self
    }

    /// Append a row to `table`.
    pub fn push(&mut self, table: &str, row: Record) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl SnapshotSource for InMemorySnapshot {
    fn fetch(&mut self, table: &str, columns: &[String]) -> anyhow::Result<Vec<Record>> {
        self.fetches += 1;
        let rows = self
            .tables
            .get(table)
            .map(|rows| rows.iter().map(|row| project(row, columns)).collect())
            .unwrap_or_default();
        Ok(rows)
    }
}

/// Keep only `columns` of a row. Columns the row lacks are left out.
pub fn project(row: &Record, columns: &[String]) -> Record {
    columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::GeneratedValue;

    fn row(a: i64, b: i64) -> Record {
        let mut record = Record::new();
        record.insert("a".to_string(), GeneratedValue::Int64(a));
        record.insert("b".to_string(), GeneratedValue::Int64(b));
        record
    }

    #[test]
    fn test_fetch_projects_columns() {
        let mut snapshot = InMemorySnapshot::new().with_table("t", vec![row(1, 2), row(3, 4)]);

        let rows = snapshot.fetch("t", &["a".to_string()]).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].get("a"), Some(&GeneratedValue::Int64(3)));
        assert_eq!(snapshot.fetch_count(), 1);
    }

    #[test]
    fn test_unknown_table_is_empty() {
        let mut snapshot = InMemorySnapshot::new();
        assert!(snapshot.fetch("missing", &["a".to_string()]).unwrap().is_empty());
    }

    fn fetch_all<S: SnapshotSource>(mut source: S) -> usize {
        source.fetch("t", &["a".to_string()]).unwrap().len()
    }

    #[test]
    fn test_fetch_through_mut_ref() {
        let mut snapshot = InMemorySnapshot::new();
        snapshot.push("t", row(1, 1));

        assert_eq!(fetch_all(&mut snapshot), 1);
        assert_eq!(snapshot.fetch_count(), 1);
    }
}
