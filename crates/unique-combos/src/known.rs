//! Set of combinations already present in, or already handed out for, a table.

use crate::combination::Combination;
use seed_core::Record;
use std::collections::HashSet;

/// Combinations seen so far for one column set.
///
/// Entries are pairwise distinct under field-wise equality across
/// `columns`, comparing values in their stored form.
#[derive(Debug, Clone)]
pub struct KnownCombos {
    columns: Vec<String>,
    /// Canonical keys of the known combinations
    keys: HashSet<String>,
}

impl KnownCombos {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            keys: HashSet::new(),
        }
    }

    /// Seed from snapshot rows, projecting each onto `columns`.
    ///
    /// Rows that repeat an earlier combination are dropped.
    pub fn from_records<I>(columns: Vec<String>, records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut known = Self::new(columns);
        for record in records {
            let combo = Combination::project(&record, &known.columns);
            known.insert(combo);
        }
        known
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Whether `names` is the tracked column set, ignoring order.
    pub fn matches_columns(&self, names: &[String]) -> bool {
        if names.len() != self.columns.len() {
            return false;
        }
        let tracked: HashSet<&str> = self.columns.iter().map(String::as_str).collect();
        names.iter().all(|n| tracked.contains(n.as_str()))
    }

    pub fn contains(&self, combo: &Combination) -> bool {
        self.keys.contains(&self.key_for(combo))
    }

    /// Record a combination. Returns `false` if an equal one was already known.
    pub fn insert(&mut self, combo: Combination) -> bool {
        self.keys.insert(self.key_for(&combo))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn key_for(&self, combo: &Combination) -> String {
        combo.canonical_key(&self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seed_core::GeneratedValue;

    fn record(pairs: &[(&str, GeneratedValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn combo(pairs: &[(&str, GeneratedValue)]) -> Combination {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_records_dedupes() {
        let known = KnownCombos::from_records(
            cols(&["a"]),
            vec![
                record(&[("a", GeneratedValue::Int64(1)), ("b", GeneratedValue::Int64(5))]),
                record(&[("a", GeneratedValue::Int64(1)), ("b", GeneratedValue::Int64(6))]),
                record(&[("a", GeneratedValue::Int64(2))]),
            ],
        );

        assert_eq!(known.len(), 2);
        assert!(known.contains(&combo(&[("a", GeneratedValue::Int64(1))])));
        assert!(!known.contains(&combo(&[("a", GeneratedValue::Int64(3))])));
    }

    #[test]
    fn test_contains_ignores_column_order() {
        let mut known = KnownCombos::new(cols(&["a", "b"]));
        assert!(known.insert(combo(&[
            ("a", GeneratedValue::Int64(1)),
            ("b", GeneratedValue::from("x")),
        ])));

        assert!(known.contains(&combo(&[
            ("b", GeneratedValue::from("x")),
            ("a", GeneratedValue::Int64(1)),
        ])));
        assert!(!known.insert(combo(&[
            ("b", GeneratedValue::from("x")),
            ("a", GeneratedValue::Int64(1)),
        ])));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn test_missing_column_compares_as_null() {
        let known = KnownCombos::from_records(
            cols(&["a", "b"]),
            vec![record(&[("a", GeneratedValue::Int64(1))])],
        );

        assert!(known.contains(&combo(&[
            ("a", GeneratedValue::Int64(1)),
            ("b", GeneratedValue::Null),
        ])));
    }

    #[test]
    fn test_values_compare_in_stored_form() {
        let id = "7f1f5a8e-4a52-4a3a-9c1e-3d2b1a0f9e8d";
        let known = KnownCombos::from_records(
            cols(&["user_id"]),
            vec![record(&[("user_id", GeneratedValue::from(id))])],
        );

        let parsed = uuid::Uuid::parse_str(id).unwrap();
        assert!(known.contains(&combo(&[("user_id", GeneratedValue::Uuid(parsed))])));
        assert!(!known.contains(&combo(&[("user_id", GeneratedValue::Int64(7))])));
    }

    #[test]
    fn test_matches_columns() {
        let known = KnownCombos::new(cols(&["a", "b"]));

        assert!(known.matches_columns(&cols(&["b", "a"])));
        assert!(!known.matches_columns(&cols(&["a"])));
        assert!(!known.matches_columns(&cols(&["a", "c"])));
    }
}
