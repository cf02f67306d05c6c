//! Error types for unique combination generation.

use thiserror::Error;

/// Errors returned by [`crate::UniqueComboGenerator`].
#[derive(Error, Debug)]
pub enum ComboError {
    /// No unique combination was found within the retry budget.
    #[error(
        "The unique generator {generator} has exceeded its maximum {max_tries} tries to find unique combinations: [{}]",
        .columns.join(", ")
    )]
    MaxTriesExceeded {
        /// Identity of the generator that gave up
        generator: String,
        /// Retry budget that was exhausted
        max_tries: u32,
        /// Columns being uniquified, in generation order
        columns: Vec<String>,
    },

    /// The column spec was empty.
    #[error("The unique generator {generator} was called without any columns")]
    EmptyColumns { generator: String },

    /// The column set differs from the one the known combinations were loaded for.
    #[error(
        "The unique generator {generator} tracks columns [{}] but was called with [{}]",
        .expected.join(", "),
        .found.join(", ")
    )]
    ColumnMismatch {
        generator: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The snapshot accessor failed.
    #[error(transparent)]
    Snapshot(anyhow::Error),

    /// A column generator failed.
    #[error(transparent)]
    Column(anyhow::Error),
}

impl ComboError {
    /// Whether this error is the exhausted retry budget.
    pub fn is_max_tries_exceeded(&self) -> bool {
        matches!(self, Self::MaxTriesExceeded { .. })
    }
}
