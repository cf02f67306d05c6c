//! Static value generator and YAML to GeneratedValue conversion.

use seed_core::GeneratedValue;
use serde_yaml::Value as YamlValue;
use std::collections::HashMap;

/// Convert a YAML value to a GeneratedValue.
pub fn yaml_to_generated_value(yaml: &YamlValue) -> GeneratedValue {
    match yaml {
        YamlValue::Null => GeneratedValue::Null,
        YamlValue::Bool(b) => GeneratedValue::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                GeneratedValue::Int64(i)
            } else if let Some(f) = n.as_f64() {
                GeneratedValue::Float64(f)
            } else {
                GeneratedValue::String(n.to_string())
            }
        }
        YamlValue::String(s) => GeneratedValue::String(s.clone()),
        YamlValue::Sequence(arr) => {
            GeneratedValue::Array(arr.iter().map(yaml_to_generated_value).collect())
        }
        YamlValue::Mapping(map) => {
            let values: HashMap<String, GeneratedValue> = map
                .iter()
                .filter_map(|(k, v)| Some((k.as_str()?.to_string(), yaml_to_generated_value(v))))
                .collect();
            GeneratedValue::Object(values)
        }
        YamlValue::Tagged(tagged) => yaml_to_generated_value(&tagged.value),
    }
}
