//! Column name to generator mapping.

use crate::combination::{ColumnOutput, Combination};
use indexmap::IndexMap;
use std::fmt;

/// Zero-argument value producer for one column.
pub type ColumnFn = Box<dyn FnMut() -> anyhow::Result<ColumnOutput>>;

/// Ordered mapping from column name to its generator.
///
/// Generators are invoked in insertion order when building a combination.
/// Registering a name twice replaces the generator and keeps the original
/// position.
#[derive(Default)]
pub struct ColumnSpec {
    columns: IndexMap<String, ColumnFn>,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an infallible column generator.
    pub fn column<F, T>(mut self, name: impl Into<String>, mut generate: F) -> Self
    where
        F: FnMut() -> T + 'static,
        T: Into<ColumnOutput>,
    {
        self.insert(name, Box::new(move || Ok(generate().into())));
        self
    }

    /// Add a column generator that may fail.
    pub fn try_column<F>(mut self, name: impl Into<String>, generate: F) -> Self
    where
        F: FnMut() -> anyhow::Result<ColumnOutput> + 'static,
    {
        self.insert(name, Box::new(generate));
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, generate: ColumnFn) {
        self.columns.insert(name.into(), generate);
    }

    /// Column names in generation order.
    pub fn names(&self) -> Vec<String> {
        self.columns.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Invoke every generator once and collect the resolved values.
    pub fn build(&mut self) -> anyhow::Result<Combination> {
        let mut combination = Combination::new();
        for (name, generate) in self.columns.iter_mut() {
            let value = generate()?.resolve();
            combination.insert(name.clone(), value);
        }
        Ok(combination)
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("columns", &self.names())
            .finish()
    }
}
