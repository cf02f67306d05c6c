//! Builds [`ColumnSpec`]s from schema column definitions.
//!
//! Every column gets its own `StdRng`, seeded from the run seed and the
//! column's `table.column` name, and its own invocation index. The same
//! seed and schema therefore produce the same values for a column no matter
//! how many retries other columns needed.

use crate::error::ColumnBuildError;
use crate::generators::generate_value;
use crate::generators::reference::ReferencePool;
use rand::rngs::StdRng;
use rand::SeedableRng;
use seed_core::{GeneratorConfig, GeneratorFieldDefinition, SeedTableDefinition};
use tracing::debug;
use unique_combos::{ColumnOutput, ColumnSpec, SnapshotSource};

/// Derive a column's RNG seed from the run seed (FNV-1a over `key`).
pub fn column_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

/// Builds column generators for the tables of a seed schema.
#[derive(Debug, Clone)]
pub struct ColumnSpecBuilder {
    seed: u64,
    start_index: u64,
}

impl ColumnSpecBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_index: 0,
        }
    }

    /// Start every column's invocation index at `index`.
    ///
    /// Used when appending to a table that already holds rows, so
    /// `sequential` and `{index}` values continue instead of restarting.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.start_index = index;
        self
    }

    /// Generators for the unique columns of `table`.
    pub fn unique_columns(
        &self,
        table: &SeedTableDefinition,
        source: &mut dyn SnapshotSource,
    ) -> Result<ColumnSpec, ColumnBuildError> {
        self.build(&table.name, &table.unique, source)
    }

    /// Generators for the plain fields of `table`.
    pub fn field_columns(
        &self,
        table: &SeedTableDefinition,
        source: &mut dyn SnapshotSource,
    ) -> Result<ColumnSpec, ColumnBuildError> {
        self.build(&table.name, &table.fields, source)
    }

    /// Generators for an arbitrary list of columns of `table_name`.
    pub fn build(
        &self,
        table_name: &str,
        columns: &[GeneratorFieldDefinition],
        source: &mut dyn SnapshotSource,
    ) -> Result<ColumnSpec, ColumnBuildError> {
        let mut spec = ColumnSpec::new();

        for column in columns {
            let seed_key = format!("{table_name}.{}", column.name);
            let mut rng = StdRng::seed_from_u64(column_seed(self.seed, &seed_key));

            match &column.generator {
                GeneratorConfig::Reference { table, key } => {
                    let pool = ReferencePool::load(&mut *source, table, key).map_err(|err| {
                        ColumnBuildError::Snapshot {
                            referenced: table.clone(),
                            source: err,
                        }
                    })?;
                    if pool.is_empty() {
                        return Err(ColumnBuildError::EmptyReference {
                            table: table_name.to_string(),
                            column: column.name.clone(),
                            referenced: table.clone(),
                            key: key.clone(),
                        });
                    }
                    debug!(
                        table = table_name,
                        column = %column.name,
                        referenced = %table,
                        rows = pool.len(),
                        "loaded reference pool"
                    );

                    spec.insert(
                        column.name.clone(),
                        Box::new(move || {
                            let entity = pool.pick(&mut rng).ok_or_else(|| {
                                anyhow::anyhow!("reference pool for '{}' is empty", pool.table())
                            })?;
                            Ok(ColumnOutput::from(entity))
                        }),
                    );
                }
                config => {
                    let config = config.clone();
                    let mut index = self.start_index;
                    spec.insert(
                        column.name.clone(),
                        Box::new(move || {
                            let value = generate_value(&config, &mut rng, index);
                            index += 1;
                            Ok(ColumnOutput::Scalar(value))
                        }),
                    );
                }
            }
        }

        Ok(spec)
    }
}
