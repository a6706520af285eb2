//! Input rules for tasks.

use crate::error::CoreError;
use crate::validation::require_non_blank;

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "Task";

/// Validate the scalar fields of a task create/update payload.
pub fn validate_task(name: &str) -> Result<(), CoreError> {
    require_non_blank("name", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn named_task_is_valid() {
        assert!(validate_task("Repair roof").is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_matches!(validate_task(""), Err(CoreError::Validation(msg)) if msg.contains("name"));
    }
}
