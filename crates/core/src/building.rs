//! Input rules for buildings and their category labels.

use crate::error::CoreError;
use crate::validation::require_non_blank;

/// Entity name used in `NotFound` errors and log fields.
pub const ENTITY: &str = "Building";

/// Validate the scalar fields of a building create/update payload.
///
/// Only `name` carries a content rule. The description and asset paths are
/// required to be present but may be empty strings, and category labels are
/// free text stored exactly as submitted.
pub fn validate_building(name: &str) -> Result<(), CoreError> {
    require_non_blank("name", name)
}
