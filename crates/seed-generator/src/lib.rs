//! Column value generators for seed-combos.
//!
//! This crate turns the generator configuration of a [`seed_core::SeedSchema`]
//! table into a [`unique_combos::ColumnSpec`]: one seeded, zero-argument
//! closure per column.
//!
//! # Example
//!
//! ```rust
//! use seed_core::SeedSchema;
//! use seed_generator::ColumnSpecBuilder;
//! use unique_combos::{InMemorySnapshot, UniqueComboGenerator};
//!
//! let schema = SeedSchema::from_yaml(r#"
//! tables:
//!   - name: users
//!     unique:
//!       - name: email
//!         generator:
//!           type: pattern
//!           pattern: "user_{index}@example.com"
//! "#).unwrap();
//!
//! let table = schema.get_table("users").unwrap();
//! let mut snapshot = InMemorySnapshot::new();
//! let mut columns = ColumnSpecBuilder::new(42)
//!     .unique_columns(table, &mut snapshot)
//!     .unwrap();
//!
//! let mut generator = UniqueComboGenerator::new("users", "users", snapshot);
//! let combo = generator.generate(&mut columns).unwrap();
//! assert_eq!(combo.get("email").and_then(|v| v.as_str()), Some("user_0@example.com"));
//! ```
//!
//! # Generators
//!
//! - `uuid_v4` - Random UUID v4
//! - `sequential` - Sequential integers
//! - `pattern` - Pattern strings with placeholders (`{index}`, `{uuid}`, `{rand:N}`)
//! - `int_range` - Random integers in a range
//! - `float_range` - Random floats in a range
//! - `decimal_range` - Random decimals in a range
//! - `timestamp_range` - Random timestamps in a date range
//! - `weighted_bool` - Boolean with configurable true probability
//! - `one_of` - Random selection from a list
//! - `static` - Static value
//! - `null` - Null value
//! - `reference` - Key of a random existing row of another table

pub mod column;
pub mod error;
pub mod generators;

// Re-exports for convenience
pub use column::{column_seed, ColumnSpecBuilder};
pub use error::ColumnBuildError;
pub use generators::generate_value;
pub use generators::reference::ReferencePool;
