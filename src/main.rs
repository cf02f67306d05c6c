//! Command-line interface for seed-combos
//!
//! # Usage Examples
//!
//! ```bash
//! # Append 1000 rows to every table of the schema
//! seed-combos generate \
//!   --schema seed.yaml \
//!   --data-dir ./data \
//!   --row-count 1000
//!
//! # Only seed memberships, allowing 20 tries per row
//! seed-combos generate -s seed.yaml -d ./data --tables memberships --max-tries 20
//!
//! # Check the data directory for duplicate combinations
//! seed-combos verify --schema seed.yaml --data-dir ./data
//! ```
//!
//! Set `RUST_LOG=info` (or `debug` to see collisions) for progress output.

use anyhow::Context;
use clap::{Parser, Subcommand};
use seed_combos::{verify_table, GenerateArgs, UniquePopulator, VerifyArgs};
use seed_core::{SeedSchema, SeedTableDefinition};
use std::path::Path;

#[derive(Parser)]
#[command(name = "seed-combos")]
#[command(about = "Seed JSONL tables with unique column combinations")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append generated rows to the tables of a seed schema
    Generate(GenerateArgs),

    /// Check tables for repeated unique combinations
    Verify(VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Verify(args) => run_verify(args),
    }
}

fn load_schema(path: &Path) -> anyhow::Result<SeedSchema> {
    SeedSchema::from_file(path)
        .with_context(|| format!("Failed to load schema from {}", path.display()))
}

/// Tables to process, in schema order.
fn select_tables<'a>(
    schema: &'a SeedSchema,
    requested: &[String],
) -> anyhow::Result<Vec<&'a SeedTableDefinition>> {
    for name in requested {
        schema.require_table(name)?;
    }
    Ok(schema
        .tables
        .iter()
        .filter(|t| requested.is_empty() || requested.contains(&t.name))
        .collect())
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.common.schema)?;
    let seed = args.resolve_seed(&schema);
    let tables: Vec<String> = select_tables(&schema, &args.common.tables)?
        .into_iter()
        .map(|t| t.name.clone())
        .collect();

    std::fs::create_dir_all(&args.common.data_dir).with_context(|| {
        format!(
            "Failed to create data directory {}",
            args.common.data_dir.display()
        )
    })?;

    tracing::info!(
        "Seeding {} tables with {} rows each into {} (seed={})",
        tables.len(),
        args.row_count,
        args.common.data_dir.display(),
        seed
    );

    let populator = UniquePopulator::new(schema, &args.common.data_dir, seed)
        .with_max_tries(args.max_tries);

    let mut total_rows = 0;
    for table_name in &tables {
        let metrics = populator
            .populate(table_name, args.row_count)
            .with_context(|| format!("Failed to populate table '{table_name}'"))?;
        total_rows += metrics.rows_written;
    }

    tracing::info!(
        "Seeding completed: {} rows across {} tables",
        total_rows,
        tables.len()
    );
    Ok(())
}

fn run_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let schema = load_schema(&args.common.schema)?;
    let tables = select_tables(&schema, &args.common.tables)?;

    let mut all_passed = true;

    for table in tables {
        if table.unique.is_empty() {
            tracing::info!("Table '{}' has no unique columns, skipping", table.name);
            continue;
        }

        let report = verify_table(&args.common.data_dir, table)
            .with_context(|| format!("Failed to verify table '{}'", table.name))?;

        for duplicate in &report.duplicates {
            let values: Vec<String> = duplicate
                .combination
                .iter()
                .map(|(column, value)| format!("{column}={}", value.to_json()))
                .collect();
            tracing::error!(
                "Table '{}': [{}] repeated on lines {:?}",
                table.name,
                values.join(", "),
                duplicate.lines
            );
        }
        if !report.is_clean() {
            all_passed = false;
        }
    }

    if all_passed {
        tracing::info!("Verification completed successfully - no duplicate combinations");
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "Verification failed - some tables contain duplicate combinations"
        ))
    }
}
