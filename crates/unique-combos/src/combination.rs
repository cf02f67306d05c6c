//! Generated combinations and the values column generators produce.

use indexmap::IndexMap;
use seed_core::{GeneratedValue, Record};
use serde_json::Value as JsonValue;
use std::fmt;

/// A stored entity a column generator can hand back instead of a scalar.
///
/// Only the entity's primary key takes part in uniqueness checks and ends
/// up in the combination.
pub trait Entity: fmt::Debug {
    /// Table the entity belongs to.
    fn table(&self) -> &str;

    /// Primary key of the entity.
    fn primary_key(&self) -> GeneratedValue;
}

/// Entity backed by a row read from a table.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub table: String,
    pub key_column: String,
    pub record: Record,
}

impl EntityRecord {
    pub fn new(table: impl Into<String>, key_column: impl Into<String>, record: Record) -> Self {
        Self {
            table: table.into(),
            key_column: key_column.into(),
            record,
        }
    }
}

impl Entity for EntityRecord {
    fn table(&self) -> &str {
        &self.table
    }

    fn primary_key(&self) -> GeneratedValue {
        self.record
            .get(&self.key_column)
            .cloned()
            .unwrap_or(GeneratedValue::Null)
    }
}

/// Output of a single column generator call.
#[derive(Debug)]
pub enum ColumnOutput {
    Scalar(GeneratedValue),
    Entity(Box<dyn Entity>),
}

impl ColumnOutput {
    /// Reduce the output to the value stored in a combination.
    pub fn resolve(self) -> GeneratedValue {
        match self {
            Self::Scalar(value) => value,
            Self::Entity(entity) => entity.primary_key(),
        }
    }
}

impl From<GeneratedValue> for ColumnOutput {
    fn from(value: GeneratedValue) -> Self {
        Self::Scalar(value)
    }
}

impl From<EntityRecord> for ColumnOutput {
    fn from(entity: EntityRecord) -> Self {
        Self::Entity(Box::new(entity))
    }
}

impl From<Box<dyn Entity>> for ColumnOutput {
    fn from(entity: Box<dyn Entity>) -> Self {
        Self::Entity(entity)
    }
}

/// One generated value per column, in generation order.
///
/// Equality is field-wise over the stored form of each value and ignores
/// column order, so a `Uuid` equals the same UUID read back as a string.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    values: IndexMap<String, GeneratedValue>,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, keeping the column's first position.
    pub fn insert(&mut self, column: impl Into<String>, value: GeneratedValue) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&GeneratedValue> {
        self.values.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GeneratedValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Project a record onto `columns`. Missing columns become `Null`.
    pub fn project(record: &Record, columns: &[String]) -> Self {
        let values = columns
            .iter()
            .map(|c| {
                let value = record.get(c).cloned().unwrap_or(GeneratedValue::Null);
                (c.clone(), value)
            })
            .collect();
        Self { values }
    }

    /// Key identifying this combination across `columns` in stored form.
    ///
    /// Combinations with equal keys are field-wise equal; a column this
    /// combination lacks counts as `Null`.
    pub fn canonical_key(&self, columns: &[String]) -> String {
        let parts: Vec<JsonValue> = columns
            .iter()
            .map(|c| self.get(c).map_or(JsonValue::Null, GeneratedValue::to_json))
            .collect();
        JsonValue::Array(parts).to_string()
    }

    pub fn into_inner(self) -> IndexMap<String, GeneratedValue> {
        self.values
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(column, value)| {
                other
                    .get(column)
                    .is_some_and(|theirs| theirs.canonical_key() == value.canonical_key())
            })
    }
}

impl FromIterator<(String, GeneratedValue)> for Combination {
    fn from_iter<T: IntoIterator<Item = (String, GeneratedValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Combination {
    type Item = (String, GeneratedValue);
    type IntoIter = indexmap::map::IntoIter<String, GeneratedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
