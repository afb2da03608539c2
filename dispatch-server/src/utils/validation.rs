//! Input validation helpers
//!
//! Centralized text length constants and validation functions. A report
//! that fails validation is rejected before any store call.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Issue titles
pub const MAX_TITLE_LEN: usize = 200;

/// Descriptions, review comments
pub const MAX_TEXT_LEN: usize = 2000;

/// Short identifiers: pincode, city, state names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Street / landmark detail lines
pub const MAX_ADDRESS_LEN: usize = 500;

/// URLs / image references
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: Option<&str>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}
