//! Field validators applied at the start of every validated setter.
//!
//! Each function enforces exactly one constraint. Setters compose them by
//! calling them in sequence with `?`, so the first failing check wins and the
//! field is never touched.

use crate::error::ValidationError;

/// Rejects a missing value.
pub fn not_nullable<'a, T: ?Sized>(
    field: &'static str,
    value: Option<&'a T>,
) -> Result<&'a T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, "value cannot be null"))
}

/// Rejects an empty string.
pub fn not_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "value cannot be empty"));
    }
    Ok(())
}

/// Rejects integers outside the inclusive range `[low, high]`.
pub fn is_int_in_range(
    field: &'static str,
    value: i64,
    low: i64,
    high: i64,
) -> Result<(), ValidationError> {
    if value < low || value > high {
        return Err(ValidationError::new(
            field,
            format!("{value} is outside the range [{low}, {high}]"),
        ));
    }
    Ok(())
}

/// Rejects a value that is not one of the allowed constants.
pub fn is_enum(field: &'static str, value: &str, allowed: &[&str]) -> Result<(), ValidationError> {
    if !allowed.contains(&value) {
        return Err(ValidationError::new(
            field,
            format!("{value:?} is not one of {allowed:?}"),
        ));
    }
    Ok(())
}
