//! Range, length and count checks shared by every parameter constructor.
//!
//! Every check returns the checked value on success so constructors can bind
//! it directly, and a [`ParameterError`] naming the field otherwise. Non-finite
//! floats never pass a range check.

use crate::domain::{ParameterError, ParameterResult};

/// Closed interval check: `lo <= value <= hi`.
pub fn require_range(value: f64, lo: f64, hi: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        return Ok(value);
    }
    Err(ParameterError::new(
        field,
        value,
        format!("must lie in [{lo}, {hi}]"),
    ))
}

/// Half-open interval check: `lo <= value < hi`.
pub fn require_half_open(value: f64, lo: f64, hi: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() && (lo..hi).contains(&value) {
        return Ok(value);
    }
    Err(ParameterError::new(
        field,
        value,
        format!("must lie in [{lo}, {hi})"),
    ))
}

/// Open interval check: `lo < value < hi`.
pub fn require_open(value: f64, lo: f64, hi: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() && value > lo && value < hi {
        return Ok(value);
    }
    Err(ParameterError::new(
        field,
        value,
        format!("must lie in ({lo}, {hi})"),
    ))
}

pub fn require_at_least(value: f64, lo: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() && value >= lo {
        return Ok(value);
    }
    Err(ParameterError::new(
        field,
        value,
        format!("must be at least {lo}"),
    ))
}

pub fn require_positive(value: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() && value > 0.0 {
        return Ok(value);
    }
    Err(ParameterError::new(field, value, "must be positive"))
}

pub fn require_finite(value: f64, field: &str) -> ParameterResult<f64> {
    if value.is_finite() {
        return Ok(value);
    }
    Err(ParameterError::new(field, value, "must be a finite number"))
}

/// All sequences must share one length.
pub fn require_equal_length(sequences: &[&[f64]], field: &str) -> ParameterResult<usize> {
    let lengths = sequences
        .iter()
        .map(|sequence| sequence.len())
        .collect::<Vec<_>>();
    let Some(first) = lengths.first().copied() else {
        return Ok(0);
    };

    if lengths.iter().all(|length| *length == first) {
        return Ok(first);
    }

    let rendered = lengths
        .iter()
        .map(|length| length.to_string())
        .collect::<Vec<_>>()
        .join(" vs ");
    Err(ParameterError::new(
        field,
        format!("lengths {rendered}"),
        "sequences must have equal length",
    ))
}

pub fn require_count_at_most(count: usize, max: usize, field: &str) -> ParameterResult<usize> {
    if count <= max {
        return Ok(count);
    }
    Err(ParameterError::new(
        field,
        count,
        format!("at most {max} entries are allowed"),
    ))
}

pub fn require_length_in(length: usize, allowed: &[usize], field: &str) -> ParameterResult<usize> {
    if allowed.contains(&length) {
        return Ok(length);
    }
    let rendered = allowed
        .iter()
        .map(|length| length.to_string())
        .collect::<Vec<_>>()
        .join(" or ");
    Err(ParameterError::new(
        field,
        format!("length {length}"),
        format!("expected {rendered} values"),
    ))
}
