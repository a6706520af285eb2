//! Field-level checks shared by the building and task rules.

use crate::error::CoreError;

/// Reject a value that is empty or whitespace-only.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
