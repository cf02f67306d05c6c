//! Seed data with unique column combinations.
//!
//! Tables are plain JSONL files in a data directory. [`UniquePopulator`]
//! appends rows whose unique columns neither repeat a row already in the
//! file nor one written earlier in the same run, and [`verify::verify_table`]
//! scans a file for combinations that occur more than once.

pub mod args;
pub mod jsonl;
pub mod populate;
pub mod verify;

pub use args::{CommonArgs, GenerateArgs, VerifyArgs};
pub use jsonl::{JsonlSnapshot, JsonlTableWriter};
pub use populate::{PopulateError, PopulateMetrics, UniquePopulator};
pub use verify::{verify_table, DuplicateCombination, VerifyError, VerifyReport};

/// Seed used when neither the command line nor the schema sets one.
pub const DEFAULT_SEED: u64 = 42;
