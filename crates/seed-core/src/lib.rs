//! Core types for seed-combos.
//!
//! - [`GeneratedValue`] - Raw generated values and their stored (JSON) form
//! - [`Record`] - One key-value row of a backing table
//! - [`SeedSchema`] - Seed definitions loaded from YAML
//!
//! ```text
//! seed-core (this crate)
//!    │
//!    ├─── unique-combos   (uniqueness filter over generated combinations)
//!    └─── seed-generator  (column generators built from GeneratorConfig)
//! ```

pub mod schema;
pub mod values;

// Re-exports for convenience
pub use schema::{
    GeneratorConfig, GeneratorFieldDefinition, SchemaError, SeedSchema, SeedTableDefinition,
};
pub use values::{record_from_json, GeneratedValue, Record};
