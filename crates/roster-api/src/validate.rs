//! Shape checks applied before a request reaches the engine.

use crate::error::ApiError;

pub fn non_empty(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid(format!("{} is required", field)));
    }
    Ok(())
}

/// Takes the id's own `is_valid()` so every id type shares one rule.
pub fn valid_id(is_valid: bool, field: &str) -> Result<(), ApiError> {
    if !is_valid {
        return Err(ApiError::invalid(format!("valid {} is required", field)));
    }
    Ok(())
}
