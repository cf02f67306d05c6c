//! Unique column combinations for seed data.
//!
//! [`UniqueComboGenerator`] wraps a set of per-column value generators
//! ([`ColumnSpec`]) with a uniqueness filter: each call builds candidate
//! combinations until one is found that is neither already stored in the
//! backing table nor returned earlier by the same generator, and gives up
//! with [`ComboError::MaxTriesExceeded`] after a bounded number of tries.
//!
//! ```text
//! SnapshotSource ──(first call only)──► KnownCombos
//!                                           ▲
//! ColumnSpec ──► candidate ──► contains? ───┤ no: insert, return
//!                    ▲                      │
//!                    └──── retry ◄──── yes ─┘ (up to max_tries)
//! ```
//!
//! # Example
//!
//! ```rust
//! use seed_core::GeneratedValue;
//! use unique_combos::{ColumnSpec, InMemorySnapshot, UniqueComboGenerator};
//!
//! let mut roles = ["admin", "member"].into_iter().cycle();
//! let mut columns = ColumnSpec::new()
//!     .column("role", move || GeneratedValue::from(roles.next().unwrap_or("admin")));
//!
//! let mut generator = UniqueComboGenerator::new("RoleSeeder", "roles", InMemorySnapshot::new());
//! let first = generator.generate(&mut columns).unwrap();
//! let second = generator.generate(&mut columns).unwrap();
//! assert_ne!(first, second);
//! ```
//!
//! Generators are single-threaded. Rows written to the backing table by
//! other processes after the first call are not detected; a unique
//! constraint in the store remains the last line of defense.

pub mod columns;
pub mod combination;
pub mod error;
pub mod generator;
pub mod known;
pub mod snapshot;

// Re-exports for convenience
pub use columns::{ColumnFn, ColumnSpec};
pub use combination::{ColumnOutput, Combination, Entity, EntityRecord};
pub use error::ComboError;
pub use generator::{UniqueComboGenerator, DEFAULT_MAX_TRIES};
pub use known::KnownCombos;
pub use snapshot::{InMemorySnapshot, SnapshotSource};
