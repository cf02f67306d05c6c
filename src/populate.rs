//! Seeds table files with rows whose unique columns never repeat.

use crate::jsonl::{count_rows, table_path, JsonlError, JsonlSnapshot, JsonlTableWriter, Row};
use seed_core::{SeedSchema, SeedTableDefinition};
use seed_generator::{ColumnBuildError, ColumnSpecBuilder};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};
use unique_combos::{ColumnSpec, ComboError, UniqueComboGenerator, DEFAULT_MAX_TRIES};

/// Errors that can occur while populating a table.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// Table not found in schema.
    #[error("Table not found in schema: {0}")]
    TableNotFound(String),

    /// Column generators could not be built.
    #[error(transparent)]
    Build(#[from] ColumnBuildError),

    /// No unique combination could be generated.
    #[error(transparent)]
    Combo(#[from] ComboError),

    /// A plain field generator failed.
    #[error("Failed to generate field of table '{table}': {source}")]
    Field {
        table: String,
        #[source]
        source: anyhow::Error,
    },

    /// Table file error.
    #[error(transparent)]
    Jsonl(#[from] JsonlError),
}

/// Metrics from a populate operation.
#[derive(Debug, Clone, Default)]
pub struct PopulateMetrics {
    /// Number of rows written.
    pub rows_written: u64,
    /// Candidate combinations generated, accepted or not.
    pub attempts: u64,
    /// Candidates rejected as duplicates.
    pub retries: u64,
    /// Total time taken.
    pub total_duration: Duration,
    /// Time spent generating data.
    pub generation_duration: Duration,
    /// Time spent writing data.
    pub write_duration: Duration,
}

impl PopulateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.total_duration.as_secs_f64() > 0.0 {
            self.rows_written as f64 / self.total_duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Populator that appends generated rows to the table files of a data directory.
///
/// The existing file of a table is the uniqueness baseline: rows already in
/// it are never repeated, and neither are rows written earlier in the run.
pub struct UniquePopulator {
    schema: SeedSchema,
    data_dir: PathBuf,
    seed: u64,
    max_tries: Option<u32>,
}

impl UniquePopulator {
    /// Create a new populator.
    ///
    /// # Arguments
    ///
    /// * `schema` - Seed schema defining tables and column generators
    /// * `data_dir` - Directory holding one `{table}.jsonl` file per table
    /// * `seed` - Random seed for deterministic generation
    pub fn new(schema: SeedSchema, data_dir: impl Into<PathBuf>, seed: u64) -> Self {
        Self {
            schema,
            data_dir: data_dir.into(),
            seed,
            max_tries: None,
        }
    }

    /// Override the retry budget of every table.
    pub fn with_max_tries(mut self, max_tries: Option<u32>) -> Self {
        self.max_tries = max_tries;
        self
    }

    pub fn schema(&self) -> &SeedSchema {
        &self.schema
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Retry budget for `table`: override, then schema, then the default.
    pub fn max_tries_for(&self, table: &SeedTableDefinition) -> u32 {
        self.max_tries
            .or(table.max_tries)
            .unwrap_or(DEFAULT_MAX_TRIES)
    }

    /// Append `count` rows to the file of `table_name`.
    ///
    /// Rows are written as they are generated. If the retry budget runs out
    /// the rows accepted so far stay in the file and the error is returned.
    pub fn populate(
        &self,
        table_name: &str,
        count: u64,
    ) -> Result<PopulateMetrics, PopulateError> {
        let start_time = Instant::now();
        let mut metrics = PopulateMetrics::default();

        let table = self
            .schema
            .get_table(table_name)
            .ok_or_else(|| PopulateError::TableNotFound(table_name.to_string()))?;

        let output_path = table_path(&self.data_dir, table_name);
        let existing = count_rows(&output_path)?;
        let max_tries = self.max_tries_for(table);
        info!(
            "Appending {} rows to '{}' for table '{}' ({} existing, max {} tries)",
            count,
            output_path.display(),
            table_name,
            existing,
            max_tries
        );

        let mut source = JsonlSnapshot::new(&self.data_dir);
        let builder = ColumnSpecBuilder::new(self.seed).with_start_index(existing);
        let mut unique = builder.unique_columns(table, &mut source)?;
        let mut fields = builder.field_columns(table, &mut source)?;

        let mut generator = UniqueComboGenerator::new(table_name, table_name, source)
            .with_max_tries(max_tries);
        let mut writer = JsonlTableWriter::append(&output_path)?;

        let outcome = write_rows(
            table_name,
            count,
            &mut generator,
            &mut unique,
            &mut fields,
            &mut writer,
            &mut metrics,
        );
        writer.flush()?;

        metrics.attempts = generator.attempts();
        metrics.retries = metrics.attempts.saturating_sub(metrics.rows_written);
        metrics.total_duration = start_time.elapsed();
        outcome?;

        info!(
            "Table '{}' complete: {} rows ({} retries) in {:?} ({:.2} rows/sec)",
            table_name,
            metrics.rows_written,
            metrics.retries,
            metrics.total_duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}

fn write_rows(
    table_name: &str,
    count: u64,
    generator: &mut UniqueComboGenerator<JsonlSnapshot>,
    unique: &mut ColumnSpec,
    fields: &mut ColumnSpec,
    writer: &mut JsonlTableWriter,
    metrics: &mut PopulateMetrics,
) -> Result<(), PopulateError> {
    for _ in 0..count {
        let gen_start = Instant::now();
        let mut row: Row = if unique.is_empty() {
            Row::new()
        } else {
            generator.generate(unique)?.into_inner()
        };
        let plain = fields.build().map_err(|source| PopulateError::Field {
            table: table_name.to_string(),
            source,
        })?;
        row.extend(plain);
        metrics.generation_duration += gen_start.elapsed();

        let write_start = Instant::now();
        writer.write_row(&row)?;
        metrics.write_duration += write_start.elapsed();

        metrics.rows_written += 1;
        if metrics.rows_written % 10000 == 0 {
            debug!("Written {} rows to '{}'", metrics.rows_written, table_name);
        }
    }
    Ok(())
}
