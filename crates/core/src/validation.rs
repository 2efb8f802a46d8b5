//! Generic input validation shared by the project and template endpoints.

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum length (in characters) of a free-form input field such as a name.
pub const STD_INPUT_MAX_LEN: usize = 2000;

/// Returns `true` if `s` has between `min` and `max` characters, inclusive.
///
/// Length is counted in Unicode scalar values, not bytes, so multi-byte
/// names are not penalised.
pub fn str_has_len(s: &str, min: usize, max: usize) -> bool {
    let len = s.chars().count();
    len >= min && len <= max
}

/// Validate an entity name: non-empty (after trimming) and at most
/// [`STD_INPUT_MAX_LEN`] characters.
pub fn validate_name(entity: &str, name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "{entity} name must not be empty"
        )));
    }
    if !str_has_len(name, 1, STD_INPUT_MAX_LEN) {
        return Err(CoreError::Validation(format!(
            "{entity} name too long: {} chars (max {STD_INPUT_MAX_LEN})",
            name.chars().count()
        )));
    }
    Ok(())
}

/// Validate that a caller-supplied id refers to a storable row.
pub fn validate_id(id: DbId) -> Result<(), CoreError> {
    if id < 1 {
        return Err(CoreError::Validation(format!("invalid id {id}")));
    }
    Ok(())
}
