//! Value representations for seed data generation.
//!
//! `GeneratedValue` is the raw value produced by a column generator or read
//! back from a backing table. Values are compared through their canonical
//! stored form (see [`GeneratedValue::canonical_key`]), which is the JSON
//! encoding written to table files.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::HashMap;
use uuid::Uuid;

/// One key-value row as returned by a backing table.
pub type Record = HashMap<String, GeneratedValue>;

/// Raw generated value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedValue {
    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int64(i64),

    /// 64-bit floating point
    Float64(f64),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Date/time with timezone
    DateTime(DateTime<Utc>),

    /// Decimal value stored as string with precision info
    Decimal {
        /// String representation of the decimal value
        value: String,
        /// Total number of digits
        precision: u8,
        /// Number of digits after decimal point
        scale: u8,
    },

    /// Array of values
    Array(Vec<GeneratedValue>),

    /// Object/map of values
    Object(HashMap<String, GeneratedValue>),

    /// Null value
    Null,
}

impl GeneratedValue {
    /// Create a new decimal value.
    pub fn decimal(value: impl Into<String>, precision: u8, scale: u8) -> Self {
        Self::Decimal {
            value: value.into(),
            precision,
            scale,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a UUID.
    pub fn as_uuid(&self) -> Option<&Uuid> {
        match self {
            Self::Uuid(u) => Some(u),
            _ => None,
        }
    }

    /// Convert to the JSON form written to table files.
    ///
    /// UUIDs, timestamps and decimals become strings, non-finite floats
    /// become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int64(i) => JsonValue::Number((*i).into()),
            Self::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Uuid(u) => JsonValue::String(u.to_string()),
            Self::DateTime(dt) => {
                JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::Decimal { value, .. } => JsonValue::String(value.clone()),
            Self::Array(values) => JsonValue::Array(values.iter().map(Self::to_json).collect()),
            Self::Object(obj) => {
                let mut keys: Vec<&String> = obj.keys().collect();
                keys.sort();
                let map: Map<String, JsonValue> = keys
                    .into_iter()
                    .map(|k| (k.clone(), obj[k].to_json()))
                    .collect();
                JsonValue::Object(map)
            }
            Self::Null => JsonValue::Null,
        }
    }

    /// Convert a JSON value read from a table file.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(*b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int64(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float64(f)
                } else {
                    Self::String(n.to_string())
                }
            }
            JsonValue::String(s) => Self::String(s.clone()),
            JsonValue::Array(arr) => Self::Array(arr.iter().map(Self::from_json).collect()),
            JsonValue::Object(obj) => Self::Object(
                obj.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Key identifying this value in its stored form.
    ///
    /// Two values with the same canonical key are the same value once
    /// written to a table: `Uuid(u)` and `String(u.to_string())` share a
    /// key, `Int64(1)` and `Float64(1.0)` do not.
    pub fn canonical_key(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<bool> for GeneratedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for GeneratedValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<i32> for GeneratedValue {
    fn from(value: i32) -> Self {
        Self::Int64(value as i64)
    }
}

impl From<f64> for GeneratedValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<&str> for GeneratedValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for GeneratedValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Uuid> for GeneratedValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// Convert a JSON object into a record. Non-object values yield `None`.
pub fn record_from_json(value: &JsonValue) -> Option<Record> {
    value.as_object().map(|obj| {
        obj.iter()
            .map(|(k, v)| (k.clone(), GeneratedValue::from_json(v)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generated_value_accessors() {
        assert_eq!(GeneratedValue::Int64(100).as_i64(), Some(100));
        assert_eq!(
            GeneratedValue::String("test".to_string()).as_str(),
            Some("test")
        );
        assert_eq!(GeneratedValue::Bool(true).as_i64(), None);
        assert!(GeneratedValue::Null.is_null());
    }

    #[test]
    fn test_uuid_matches_stored_string() {
        let id = Uuid::new_v4();
        let generated = GeneratedValue::Uuid(id);
        let stored = GeneratedValue::from_json(&generated.to_json());

        assert_eq!(stored, GeneratedValue::String(id.to_string()));
        assert_eq!(generated.canonical_key(), stored.canonical_key());
    }

    #[test]
    fn test_int_and_float_keys_differ() {
        assert_ne!(
            GeneratedValue::Int64(1).canonical_key(),
            GeneratedValue::Float64(1.0).canonical_key()
        );
        assert_ne!(
            GeneratedValue::Int64(1).canonical_key(),
            GeneratedValue::String("1".to_string()).canonical_key()
        );
    }

    #[test]
    fn test_datetime_json_form() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            GeneratedValue::DateTime(dt).to_json(),
            JsonValue::String("2024-01-02T03:04:05Z".to_string())
        );
    }

    #[test]
    fn test_object_key_is_order_independent() {
        let mut a = HashMap::new();
        a.insert("x".to_string(), GeneratedValue::Int64(1));
        a.insert("y".to_string(), GeneratedValue::Int64(2));
        let mut b = HashMap::new();
        b.insert("y".to_string(), GeneratedValue::Int64(2));
        b.insert("x".to_string(), GeneratedValue::Int64(1));

        assert_eq!(
            GeneratedValue::Object(a).canonical_key(),
            GeneratedValue::Object(b).canonical_key()
        );
    }

    #[test]
    fn test_record_from_json() {
        let json: JsonValue =
            serde_json::from_str(r#"{"id": 7, "name": "alice", "score": 1.5}"#).unwrap();
        let record = record_from_json(&json).unwrap();

        assert_eq!(record.get("id"), Some(&GeneratedValue::Int64(7)));
        assert_eq!(
            record.get("name"),
            Some(&GeneratedValue::String("alice".to_string()))
        );
        assert_eq!(record.get("score"), Some(&GeneratedValue::Float64(1.5)));
        assert!(record_from_json(&JsonValue::Bool(true)).is_none());
    }
}
