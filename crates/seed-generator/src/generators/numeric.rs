//! Numeric value generators.

use rand::Rng;
use seed_core::GeneratedValue;

/// Generate a random integer in the given range (inclusive).
///
/// A reversed range yields `min`.
pub fn generate_int_range<R: Rng>(rng: &mut R, min: i64, max: i64) -> GeneratedValue {
    if min >= max {
        return GeneratedValue::Int64(min);
    }
    GeneratedValue::Int64(rng.gen_range(min..=max))
}

/// Sample `min..=max`, or `None` when the bounds cannot be sampled from.
fn sample_float<R: Rng>(rng: &mut R, min: f64, max: f64) -> Option<f64> {
    if !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
        return None;
    }
    if min >= max {
        return Some(min);
    }
    Some(rng.gen_range(min..=max))
}

/// Generate a random float in the given range (inclusive).
///
/// Non-finite bounds, or a span wider than `f64::MAX`, yield `Null`.
pub fn generate_float_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> GeneratedValue {
    sample_float(rng, min, max).map_or(GeneratedValue::Null, GeneratedValue::Float64)
}

/// Generate a random decimal in the given range.
///
/// The decimal is stored as a string with 2 decimal places.
pub fn generate_decimal_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> GeneratedValue {
    match sample_float(rng, min, max) {
        Some(value) => GeneratedValue::decimal(format!("{value:.2}"), 10, 2),
        None => GeneratedValue::Null,
    }
}

/// Generate a boolean that is `true` with probability `true_weight`.
///
/// The weight is clamped to `0.0..=1.0`; a NaN weight yields `Null`.
pub fn generate_weighted_bool<R: Rng>(rng: &mut R, true_weight: f64) -> GeneratedValue {
    if true_weight.is_nan() {
        return GeneratedValue::Null;
    }
    GeneratedValue::Bool(rng.gen_bool(true_weight.clamp(0.0, 1.0)))
}
