//! Pattern-based string generator.
//!
//! Supports placeholders:
//! - `{index}` - column invocation index
//! - `{uuid}` - random UUID
//! - `{rand:N}` - random N-digit number

use super::uuid::random_uuid;
use rand::Rng;
use seed_core::GeneratedValue;

/// Generate a string based on a pattern with placeholders.
pub fn generate_pattern<R: Rng>(pattern: &str, rng: &mut R, index: u64) -> GeneratedValue {
    let mut result = pattern.replace("{index}", &index.to_string());

    while result.contains("{uuid}") {
        result = result.replacen("{uuid}", &random_uuid(rng).to_string(), 1);
    }

    // Replace {rand:N} left to right; stop at the first malformed placeholder
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("{rand:") {
        let start = search_from + offset;
        let Some(len) = result[start..].find('}') else {
            break;
        };
        let end = start + len;
        let Ok(digits) = result[start + 6..end].parse::<usize>() else {
            break;
        };
        let random_num = generate_random_digits(rng, digits);
        result = format!("{}{}{}", &result[..start], random_num, &result[end + 1..]);
        search_from = start + random_num.len();
    }

    GeneratedValue::String(result)
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    (0..digits)
        .map(|i| {
            // No leading zero
            let low = if i == 0 { 1 } else { 0 };
            char::from(b'0' + rng.gen_range(low..10u8))
        })
        .collect()
}
