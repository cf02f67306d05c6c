//! Retry loop that hands out combinations unique against a backing table.

use crate::columns::ColumnSpec;
use crate::combination::Combination;
use crate::error::ComboError;
use crate::known::KnownCombos;
use crate::snapshot::SnapshotSource;
use tracing::{debug, info, warn};

/// Retry budget used when none is configured.
pub const DEFAULT_MAX_TRIES: u32 = 5;

/// Generates column combinations that do not collide with rows already in
/// `table` or with combinations this instance returned before.
///
/// The existing rows are fetched from the snapshot source on the first call
/// and cached for the lifetime of the generator. Rows inserted into the
/// table by anyone else afterwards are not seen.
pub struct UniqueComboGenerator<S> {
    /// Identity reported when the retry budget runs out
    name: String,
    /// Backing table the snapshot is read from
    table: String,
    source: S,
    max_tries: u32,
    /// Loaded on first use
    known: Option<KnownCombos>,
    /// Generation attempts across all calls
    attempts: u64,
}

impl<S: SnapshotSource> UniqueComboGenerator<S> {
    pub fn new(name: impl Into<String>, table: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            source,
            max_tries: DEFAULT_MAX_TRIES,
            known: None,
            attempts: 0,
        }
    }

    /// Set the retry budget used by [`Self::generate`].
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn max_tries(&self) -> u32 {
        self.max_tries
    }

    /// Known combinations, once loaded.
    pub fn known(&self) -> Option<&KnownCombos> {
        self.known.as_ref()
    }

    /// Total generation attempts made by this instance.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Generate a unique combination with the configured retry budget.
    pub fn generate(&mut self, columns: &mut ColumnSpec) -> Result<Combination, ComboError> {
        self.generate_with(columns, self.max_tries)
    }

    /// Generate a unique combination, trying at most `max_tries` times.
    ///
    /// A budget of zero fails without generating anything. The accepted
    /// combination is recorded so later calls never return it again.
    pub fn generate_with(
        &mut self,
        columns: &mut ColumnSpec,
        max_tries: u32,
    ) -> Result<Combination, ComboError> {
        let names = columns.names();
        if names.is_empty() {
            return Err(ComboError::EmptyColumns {
                generator: self.name.clone(),
            });
        }

        let known = load_known(
            &mut self.known,
            &mut self.source,
            &self.name,
            &self.table,
            &names,
        )?;

        let mut tries = 0;
        while tries < max_tries {
            tries += 1;
            self.attempts += 1;

            let candidate = columns.build().map_err(ComboError::Column)?;
            if !known.contains(&candidate) {
                known.insert(candidate.clone());
                return Ok(candidate);
            }

            debug!(
                generator = %self.name,
                table = %self.table,
                attempt = tries,
                max_tries,
                "combination already taken, retrying"
            );
        }

        warn!(
            generator = %self.name,
            table = %self.table,
            max_tries,
            known = known.len(),
            "no unique combination found"
        );

        Err(ComboError::MaxTriesExceeded {
            generator: self.name.clone(),
            max_tries,
            columns: names,
        })
    }
}

/// Return the cached known combinations, fetching the snapshot on first use.
fn load_known<'a, S: SnapshotSource>(
    known: &'a mut Option<KnownCombos>,
    source: &mut S,
    generator: &str,
    table: &str,
    names: &[String],
) -> Result<&'a mut KnownCombos, ComboError> {
    let loaded = match known.take() {
        Some(loaded) => loaded,
        None => {
            let rows = source.fetch(table, names).map_err(ComboError::Snapshot)?;
            let rows_read = rows.len();
            let loaded = KnownCombos::from_records(names.to_vec(), rows);
            info!(
                generator,
                table,
                columns = ?names,
                rows = rows_read,
                distinct = loaded.len(),
                "loaded existing combinations"
            );
            loaded
        }
    };

    let known = known.insert(loaded);
    if !known.matches_columns(names) {
        return Err(ComboError::ColumnMismatch {
            generator: generator.to_string(),
            expected: known.columns().to_vec(),
            found: names.to_vec(),
        });
    }
    Ok(known)
}
