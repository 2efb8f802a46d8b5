//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for listing templates.
#[derive(Debug, Deserialize)]
pub struct ListTemplatesParams {
    /// Template type filter (`campaign`, `tx`). All types when absent.
    pub status: Option<String>,
    #[serde(default)]
    pub no_body: bool,
}

/// Query parameters for fetching a single template.
#[derive(Debug, Deserialize)]
pub struct GetTemplateParams {
    #[serde(default)]
    pub no_body: bool,
}
