//! Small field validators shared by the repositories.

use crate::error::CoreError;

/// Reject a missing or whitespace-only required text field.
pub fn require_non_blank(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}
