//! Reference generator: picks existing rows of another table.

use rand::Rng;
use seed_core::Record;
use unique_combos::{EntityRecord, SnapshotSource};

/// Rows of a referenced table, loaded once when the column is built.
#[derive(Debug, Clone)]
pub struct ReferencePool {
    table: String,
    key: String,
    rows: Vec<Record>,
}

impl ReferencePool {
    /// Load the key column of every row of `table`.
    ///
    /// Rows without a non-null key are skipped.
    pub fn load<S: SnapshotSource + ?Sized>(
        source: &mut S,
        table: &str,
        key: &str,
    ) -> anyhow::Result<Self> {
        let rows = source
            .fetch(table, &[key.to_string()])?
            .into_iter()
            .filter(|row| row.get(key).is_some_and(|v| !v.is_null()))
            .collect();
        Ok(Self::new(table, key, rows))
    }

    pub fn new(table: impl Into<String>, key: impl Into<String>, rows: Vec<Record>) -> Self {
        Self {
            table: table.into(),
            key: key.into(),
            rows,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Pick a random row as an entity, or `None` if the table is empty.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<EntityRecord> {
        if self.rows.is_empty() {
            return None;
        }
        let row = &self.rows[rng.gen_range(0..self.rows.len())];
        Some(EntityRecord::new(&self.table, &self.key, row.clone()))
    }
}
