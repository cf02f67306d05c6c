//! Seed schema definitions.
//!
//! A seed schema is a YAML file listing the tables to seed. Each table names
//! the columns whose combination must stay unique (`unique`) and the plain
//! columns generated alongside them (`fields`), each with a generator.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Table not found in schema
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Table defined more than once
    #[error("Table '{0}' is defined more than once")]
    DuplicateTable(String),

    /// Column defined more than once within a table
    #[error("Column '{column}' is defined more than once in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    /// Generator parameters that cannot produce values
    #[error("Invalid generator for column '{column}' in table '{table}': {reason}")]
    InvalidGenerator {
        table: String,
        column: String,
        reason: String,
    },
}

// ============================================================================
// Generator Types
// ============================================================================

/// Generator configuration for a column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorConfig {
    /// Generate UUIDs (v4)
    UuidV4,

    /// Generate sequential integers
    Sequential {
        /// Starting value
        #[serde(default)]
        start: i64,
    },

    /// Generate values using a pattern with placeholders
    Pattern {
        /// Pattern string (supports {index}, {uuid}, {rand:N})
        pattern: String,
    },

    /// Generate random integers in a range
    IntRange {
        /// Minimum value (inclusive)
        min: i64,
        /// Maximum value (inclusive)
        max: i64,
    },

    /// Generate random floats in a range
    FloatRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate random decimals in a range
    DecimalRange {
        /// Minimum value (inclusive)
        min: f64,
        /// Maximum value (inclusive)
        max: f64,
    },

    /// Generate timestamps in a range
    TimestampRange {
        /// Start timestamp (ISO 8601)
        start: String,
        /// End timestamp (ISO 8601)
        end: String,
    },

    /// Generate weighted boolean values
    WeightedBool {
        /// Weight for true value (0.0 to 1.0)
        true_weight: f64,
    },

    /// Generate random selection from a pool of values
    OneOf {
        /// Pool of values to select from
        values: Vec<serde_yaml::Value>,
    },

    /// Generate a static value
    Static {
        /// The static value to use
        value: serde_yaml::Value,
    },

    /// Generate null values
    Null,

    /// Pick an existing row of another table.
    ///
    /// Only the row's `key` column is kept in the generated combination.
    Reference {
        /// Referenced table
        table: String,
        /// Key column of the referenced table
        #[serde(default = "default_reference_key")]
        key: String,
    },
}

fn default_reference_key() -> String {
    "id".to_string()
}

impl GeneratorConfig {
    /// Check parameters that parse but cannot be sampled from.
    pub fn check(&self) -> Result<(), String> {
        match self {
            Self::FloatRange { min, max } | Self::DecimalRange { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(format!("range bounds must be finite, got {min}..={max}"));
                }
                if !(max - min).is_finite() {
                    return Err(format!("range {min}..={max} is too wide"));
                }
                Ok(())
            }
            Self::WeightedBool { true_weight } if !true_weight.is_finite() => {
                Err(format!("true_weight must be finite, got {true_weight}"))
            }
            _ => Ok(()),
        }
    }
}

/// Column with generator config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorFieldDefinition {
    /// Column name
    pub name: String,

    /// Generator configuration for this column
    pub generator: GeneratorConfig,
}

impl GeneratorFieldDefinition {
    /// Create a new column definition.
    pub fn new(name: impl Into<String>, generator: GeneratorConfig) -> Self {
        Self {
            name: name.into(),
            generator,
        }
    }
}

/// Table to seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedTableDefinition {
    /// Table name
    pub name: String,

    /// Columns whose combination must be unique across the table
    #[serde(default)]
    pub unique: Vec<GeneratorFieldDefinition>,

    /// Columns generated without uniqueness checks
    #[serde(default)]
    pub fields: Vec<GeneratorFieldDefinition>,

    /// Retry budget for finding a unique combination
    #[serde(default)]
    pub max_tries: Option<u32>,
}

impl SeedTableDefinition {
    /// Names of the unique columns, in declaration order.
    pub fn unique_column_names(&self) -> Vec<String> {
        self.unique.iter().map(|c| c.name.clone()).collect()
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for column in self.unique.iter().chain(self.fields.iter()) {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: column.name.clone(),
                });
            }
            column
                .generator
                .check()
                .map_err(|reason| SchemaError::InvalidGenerator {
                    table: self.name.clone(),
                    column: column.name.clone(),
                    reason,
                })?;
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

/// Full seed schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default random seed
    #[serde(default)]
    pub seed: Option<u64>,

    /// Table definitions, in seeding order
    pub tables: Vec<SeedTableDefinition>,

    /// Cached table lookup (not serialized)
    #[serde(skip)]
    table_map: HashMap<String, usize>,
}

impl SeedSchema {
    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: SeedSchema = serde_yaml::from_str(yaml)?;
        schema.build_table_map()?;
        Ok(schema)
    }

    /// Build the internal table lookup map, validating names along the way.
    fn build_table_map(&mut self) -> Result<(), SchemaError> {
        self.table_map.clear();
        for (idx, table) in self.tables.iter().enumerate() {
            table.validate()?;
            if self.table_map.insert(table.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
        }
        Ok(())
    }

    /// Get a table schema by name.
    pub fn get_table(&self, name: &str) -> Option<&SeedTableDefinition> {
        self.table_map
            .get(name)
            .and_then(|&idx| self.tables.get(idx))
    }

    /// Get a table schema by name, failing if it is missing.
    pub fn require_table(&self, name: &str) -> Result<&SeedTableDefinition, SchemaError> {
        self.get_table(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Get all table names in the schema.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEMA: &str = r#"
version: 1
seed: 42

tables:
  - name: users
    unique:
      - name: email
        generator:
          type: pattern
          pattern: "user_{index}@example.com"
    fields:
      - name: age
        generator:
          type: int_range
          min: 18
          max: 80

  - name: memberships
    max_tries: 10
    unique:
      - name: user_id
        generator:
          type: reference
          table: users
      - name: role
        generator:
          type: one_of
          values: [admin, member]
"#;

    #[test]
    fn test_parse_seed_schema() {
        let schema = SeedSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.seed, Some(42));
        assert_eq!(schema.table_names(), vec!["users", "memberships"]);

        let users = schema.get_table("users").unwrap();
        assert_eq!(users.unique_column_names(), vec!["email".to_string()]);
        assert_eq!(users.fields.len(), 1);
        assert_eq!(users.max_tries, None);
    }

    #[test]
    fn test_reference_key_defaults_to_id() {
        let schema = SeedSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let memberships = schema.get_table("memberships").unwrap();

        assert_eq!(memberships.max_tries, Some(10));
        assert_eq!(
            memberships.unique[0].generator,
            GeneratorConfig::Reference {
                table: "users".to_string(),
                key: "id".to_string(),
            }
        );
    }

    #[test]
    fn test_table_not_found() {
        let schema = SeedSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let result = schema.require_table("nonexistent");
        assert!(matches!(result, Err(SchemaError::TableNotFound(_))));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let yaml = r#"
tables:
  - name: t
    unique:
      - name: a
        generator: { type: "null" }
    fields:
      - name: a
        generator: { type: "null" }
"#;
        let result = SeedSchema::from_yaml(yaml);
        assert!(matches!(
            result,
            Err(SchemaError::DuplicateColumn { ref column, .. }) if column == "a"
        ));
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let cases = [
            "{ type: weighted_bool, true_weight: .nan }",
            "{ type: float_range, min: 0.0, max: .inf }",
            "{ type: decimal_range, min: .nan, max: 1.0 }",
            "{ type: float_range, min: -1.7e308, max: 1.7e308 }",
        ];
        for generator in cases {
            let yaml = format!(
                "tables:\n  - name: t\n    fields:\n      - name: v\n        generator: {generator}\n"
            );
            let result = SeedSchema::from_yaml(&yaml);
            assert!(
                matches!(
                    result,
                    Err(SchemaError::InvalidGenerator { ref column, .. }) if column == "v"
                ),
                "{generator} was accepted"
            );
        }
    }

    #[test]
    fn test_finite_parameters_accepted() {
        let yaml = r#"
tables:
  - name: t
    fields:
      - name: w
        generator: { type: weighted_bool, true_weight: 1.5 }
      - name: f
        generator: { type: float_range, min: -10.0, max: 10.0 }
"#;
        assert!(SeedSchema::from_yaml(yaml).is_ok());
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let yaml = r#"
tables:
  - name: t
  - name: t
"#;
        let result = SeedSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::DuplicateTable(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.yaml");
        std::fs::write(&path, SAMPLE_SCHEMA).unwrap();

        let schema = SeedSchema::from_file(&path).unwrap();
        assert!(schema.get_table("memberships").is_some());
    }
}
