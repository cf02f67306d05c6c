//! Error types for building column generators.

use thiserror::Error;

/// Errors that can occur while turning a schema table into column generators.
#[derive(Error, Debug)]
pub enum ColumnBuildError {
    /// A reference column points at a table with no usable rows.
    #[error("Column '{column}' of table '{table}' references '{referenced}', which has no rows with a '{key}' value")]
    EmptyReference {
        table: String,
        column: String,
        referenced: String,
        key: String,
    },

    /// Reading the referenced table failed.
    #[error("Failed to load rows of referenced table '{referenced}': {source}")]
    Snapshot {
        referenced: String,
        #[source]
        source: anyhow::Error,
    },
}
