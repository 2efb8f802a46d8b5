//! Template and template-attribute constants and validation.
//!
//! Provides the allowed template types, attribute value kinds, and the
//! validation helpers the API layer runs before any storage call.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::validation::{validate_name, STD_INPUT_MAX_LEN};

/* --------------------------------------------------------------------------
   Template types
   -------------------------------------------------------------------------- */

/// Template used to render bulk campaign messages.
pub const TEMPLATE_TYPE_CAMPAIGN: &str = "campaign";

/// Template used to render transactional (one-off) messages.
pub const TEMPLATE_TYPE_TX: &str = "tx";

/// All valid template types.
pub const VALID_TEMPLATE_TYPES: &[&str] = &[TEMPLATE_TYPE_CAMPAIGN, TEMPLATE_TYPE_TX];

/* --------------------------------------------------------------------------
   Attribute value kinds
   -------------------------------------------------------------------------- */

pub const ATTRIBUTE_TYPE_STRING: &str = "string";
pub const ATTRIBUTE_TYPE_NUMBER: &str = "number";
pub const ATTRIBUTE_TYPE_DATE: &str = "date";
pub const ATTRIBUTE_TYPE_BOOL: &str = "bool";

/// All valid attribute value kinds.
pub const VALID_ATTRIBUTE_TYPES: &[&str] = &[
    ATTRIBUTE_TYPE_STRING,
    ATTRIBUTE_TYPE_NUMBER,
    ATTRIBUTE_TYPE_DATE,
    ATTRIBUTE_TYPE_BOOL,
];

/// Maximum length for an attribute key (placeholder name).
pub const MAX_ATTRIBUTE_KEY_LEN: usize = 200;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a template name.
pub fn validate_template_name(name: &str) -> Result<(), CoreError> {
    validate_name("Template", name)
}

/// Validate that `template_type` is one of [`VALID_TEMPLATE_TYPES`].
pub fn validate_template_type(template_type: &str) -> Result<(), CoreError> {
    if VALID_TEMPLATE_TYPES.contains(&template_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid template type '{template_type}'. Must be one of: {}",
            VALID_TEMPLATE_TYPES.join(", ")
        )))
    }
}

/// Validate that `attribute_type` is one of [`VALID_ATTRIBUTE_TYPES`].
pub fn validate_attribute_type(attribute_type: &str) -> Result<(), CoreError> {
    if VALID_ATTRIBUTE_TYPES.contains(&attribute_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid attribute type '{attribute_type}'. Must be one of: {}",
            VALID_ATTRIBUTE_TYPES.join(", ")
        )))
    }
}

/// Validate an attribute key: non-empty, no whitespace, within length limit.
pub fn validate_attribute_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation(
            "Attribute key must not be empty".to_string(),
        ));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(format!(
            "Attribute key '{key}' must not contain whitespace"
        )));
    }
    if key.chars().count() > MAX_ATTRIBUTE_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Attribute key too long: {} chars (max {MAX_ATTRIBUTE_KEY_LEN})",
            key.chars().count()
        )));
    }
    Ok(())
}

/// Validate a template subject line. Empty subjects are allowed.
pub fn validate_subject(subject: &str) -> Result<(), CoreError> {
    if subject.chars().count() > STD_INPUT_MAX_LEN {
        return Err(CoreError::Validation(format!(
            "Template subject too long (max {STD_INPUT_MAX_LEN})"
        )));
    }
    Ok(())
}

/// Validate that no two attributes in one submission share a key.
///
/// Two placeholders with the same name would be indistinguishable when the
/// template is rendered.
pub fn validate_unique_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CoreError::Validation(format!(
                "Duplicate attribute key '{key}'"
            )));
        }
    }
    Ok(())
}
