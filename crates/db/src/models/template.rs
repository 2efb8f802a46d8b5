//! Template model, DTOs, and the enriched read model.

use courier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::project::Project;
use crate::models::template_attribute::{AttributeInput, TemplateAttribute};

/// A row from the `templates` table.
///
/// `body` is empty when the row was loaded with the body omitted.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub template_type: String,
    pub subject: String,
    #[serde(with = "body_base64")]
    pub body: Vec<u8>,
    pub is_default: bool,
    pub project_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A template together with its parent project and its attributes.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateWithRelations {
    #[serde(flatten)]
    pub template: Template,
    pub project: Project,
    pub attributes: Vec<TemplateAttribute>,
}

/// DTO for creating a template along with its initial attribute set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, with = "body_base64")]
    pub body: Vec<u8>,
    pub project_id: DbId,
    #[serde(default)]
    pub attributes: Vec<AttributeInput>,
}

/// DTO for updating a template.
///
/// Scalar fields are replaced wholesale. `attributes` is the complete
/// desired attribute list: persisted attributes missing from it are
/// deleted, entries without an id are created.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTemplate {
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, with = "body_base64")]
    pub body: Vec<u8>,
    pub project_id: DbId,
    #[serde(default)]
    pub attributes: Vec<AttributeInput>,
}

/// Filter for listing templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateFilter {
    /// Restrict to one template type (`campaign`, `tx`).
    pub template_type: Option<String>,
    /// When `false`, bodies are returned empty.
    pub include_body: bool,
}

/// Serde adapter carrying opaque body bytes as a base64 string.
mod body_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
