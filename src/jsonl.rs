//! JSONL table files: one file per table, one JSON object per line.
//!
//! A data directory holds `{table}.jsonl` for every seeded table. The files
//! double as the backing store the unique generator takes its snapshot from.

use indexmap::IndexMap;
use seed_core::{record_from_json, GeneratedValue, Record};
use serde_json::{Map, Value as JsonValue};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use unique_combos::snapshot::project;
use unique_combos::SnapshotSource;

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// One output row, columns in generation order.
pub type Row = IndexMap<String, GeneratedValue>;

/// Errors reading or writing table files.
#[derive(Error, Debug)]
pub enum JsonlError {
    /// IO error.
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line is not valid JSON.
    #[error("Invalid JSON in '{}' at line {line}: {source}", .path.display())]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A line is valid JSON but not an object.
    #[error("Line {line} of '{}' is not a JSON object", .path.display())]
    NotAnObject { path: PathBuf, line: usize },
}

impl JsonlError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Path of a table's file inside `dir`.
pub fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{table}.jsonl"))
}

/// Read every row of a table file with its 1-based line number.
///
/// A missing file is an empty table. Blank lines are skipped.
pub fn read_numbered_records(path: &Path) -> Result<Vec<(usize, Record)>, JsonlError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Table file '{}' does not exist yet", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(JsonlError::io(path, e)),
    };

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| JsonlError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let json: JsonValue = serde_json::from_str(&line).map_err(|source| JsonlError::Json {
            path: path.to_path_buf(),
            line: line_no,
            source,
        })?;
        let record = record_from_json(&json).ok_or_else(|| JsonlError::NotAnObject {
            path: path.to_path_buf(),
            line: line_no,
        })?;
        records.push((line_no, record));
    }
    Ok(records)
}

/// Read every row of a table file.
pub fn read_records(path: &Path) -> Result<Vec<Record>, JsonlError> {
    Ok(read_numbered_records(path)?
        .into_iter()
        .map(|(_, record)| record)
        .collect())
}

/// Number of rows in a table file.
pub fn count_rows(path: &Path) -> Result<u64, JsonlError> {
    Ok(read_numbered_records(path)?.len() as u64)
}

/// Snapshot source reading table files from a data directory.
#[derive(Debug, Clone)]
pub struct JsonlSnapshot {
    dir: PathBuf,
}

impl JsonlSnapshot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SnapshotSource for JsonlSnapshot {
    fn fetch(&mut self, table: &str, columns: &[String]) -> anyhow::Result<Vec<Record>> {
        let path = table_path(&self.dir, table);
        let rows = read_records(&path)?
            .iter()
            .map(|row| project(row, columns))
            .collect::<Vec<_>>();
        debug!(
            table,
            rows = rows.len(),
            "Read snapshot from '{}'",
            path.display()
        );
        Ok(rows)
    }
}

/// Appends rows to a table file.
pub struct JsonlTableWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlTableWriter {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: impl Into<PathBuf>) -> Result<Self, JsonlError> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| JsonlError::io(&path, e))?;
        Ok(Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            path,
        })
    }

    pub fn write_row(&mut self, row: &Row) -> Result<(), JsonlError> {
        let object: Map<String, JsonValue> = row
            .iter()
            .map(|(column, value)| (column.clone(), value.to_json()))
            .collect();
        serde_json::to_writer(&mut self.writer, &JsonValue::Object(object))
            .map_err(|e| JsonlError::io(&self.path, e.into()))?;
        writeln!(self.writer).map_err(|e| JsonlError::io(&self.path, e))
    }

    pub fn flush(&mut self) -> Result<(), JsonlError> {
        self.writer
            .flush()
            .map_err(|e| JsonlError::io(&self.path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
