//! Template attribute model and input DTO.

use courier_core::reconcile::ChildEntity;
use courier_core::template::ATTRIBUTE_TYPE_STRING;
use courier_core::types::{DbId, UNSET_ID};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `template_attributes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct TemplateAttribute {
    pub id: DbId,
    pub key: String,
    pub description: String,
    pub required: bool,
    pub default_value: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub attribute_type: String,
    pub template_id: DbId,
}

/// An attribute as submitted by a client inside a template payload.
///
/// `id` is omitted (or `0`) for attributes that do not exist yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeInput {
    #[serde(default)]
    pub id: DbId,
    pub key: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: String,
    #[serde(rename = "type", default = "default_attribute_type")]
    pub attribute_type: String,
}

fn default_attribute_type() -> String {
    ATTRIBUTE_TYPE_STRING.to_string()
}

impl AttributeInput {
    /// A fresh attribute of the default value kind.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            id: UNSET_ID,
            key: key.into(),
            description: String::new(),
            required: false,
            default_value: String::new(),
            attribute_type: default_attribute_type(),
        }
    }
}

impl From<TemplateAttribute> for AttributeInput {
    fn from(row: TemplateAttribute) -> Self {
        Self {
            id: row.id,
            key: row.key,
            description: row.description,
            required: row.required,
            default_value: row.default_value,
            attribute_type: row.attribute_type,
        }
    }
}

impl ChildEntity for AttributeInput {
    const ENTITY: &'static str = "Template attribute";

    fn id(&self) -> DbId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let input: AttributeInput = serde_json::from_str(r#"{"key": "first_name"}"#).unwrap();
        assert_eq!(input, AttributeInput::new("first_name"));
        assert!(input.is_new());
    }

    #[test]
    fn type_field_is_renamed() {
        let input: AttributeInput =
            serde_json::from_str(r#"{"id": 7, "key": "due", "type": "date", "required": true}"#)
                .unwrap();
        assert_eq!(input.id, 7);
        assert_eq!(input.attribute_type, "date");
        assert!(input.required);
    }
}
