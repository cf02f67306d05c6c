//! CLI argument definitions.

use crate::DEFAULT_SEED;
use clap::Args;
use seed_core::SeedSchema;
use std::path::PathBuf;

/// Arguments shared by every subcommand.
#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Path to seed schema YAML file
    #[arg(long, short = 's', env = "SEED_COMBOS_SCHEMA")]
    pub schema: PathBuf,

    /// Directory holding one JSONL file per table
    #[arg(long, short = 'd', env = "SEED_COMBOS_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Specific tables to process (comma-separated, empty = all tables from schema)
    #[arg(long, value_delimiter = ',')]
    pub tables: Vec<String>,
}

/// Arguments for seeding tables.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Number of rows to append per table
    #[arg(long, default_value = "100")]
    pub row_count: u64,

    /// Random seed (default: schema seed, then 42)
    #[arg(long, env = "SEED_COMBOS_SEED")]
    pub seed: Option<u64>,

    /// Retry budget per row, overriding the schema's max_tries
    #[arg(long)]
    pub max_tries: Option<u32>,
}

impl GenerateArgs {
    /// Seed for the run: `--seed`, then the schema's seed, then [`DEFAULT_SEED`].
    pub fn resolve_seed(&self, schema: &SeedSchema) -> u64 {
        self.seed.or(schema.seed).unwrap_or(DEFAULT_SEED)
    }
}

/// Arguments for checking tables for duplicate combinations.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}
