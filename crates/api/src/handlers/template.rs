//! Handlers for the `/templates` resource.
//!
//! Input is validated here, before any storage call. Writes go through
//! [`TemplateService`], which runs them in a single transaction and
//! reconciles the attribute set on update.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use courier_core::error::CoreError;
use courier_core::template;
use courier_core::types::DbId;
use courier_db::models::template::{CreateTemplate, TemplateFilter, UpdateTemplate};
use courier_db::models::template_attribute::AttributeInput;
use courier_db::repositories::{ProjectRepo, TemplateRepo};
use courier_db::services::TemplateService;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::IdPath;
use crate::query::{GetTemplateParams, ListTemplatesParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate every submitted attribute and reject duplicate keys.
fn validate_attributes(attributes: &[AttributeInput]) -> Result<(), CoreError> {
    for attribute in attributes {
        template::validate_attribute_key(&attribute.key)?;
        template::validate_attribute_type(&attribute.attribute_type)?;
    }
    template::validate_unique_keys(attributes.iter().map(|a| a.key.as_str()))
}

async fn ensure_project_exists(pool: &PgPool, id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

async fn ensure_template_exists(pool: &PgPool, id: DbId) -> AppResult<()> {
    if TemplateRepo::exists(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// GET /templates
// ---------------------------------------------------------------------------

/// List templates with their project and attributes.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListTemplatesParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref template_type) = params.status {
        template::validate_template_type(template_type)?;
    }

    let filter = TemplateFilter {
        template_type: params.status,
        include_body: !params.no_body,
    };
    let items = TemplateService::list(&state.pool, &filter).await?;
    tracing::debug!(count = items.len(), "Listed templates");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /templates/{id}
// ---------------------------------------------------------------------------

/// Get a single template with its project and attributes.
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Query(params): Query<GetTemplateParams>,
) -> AppResult<impl IntoResponse> {
    let t = TemplateService::find(&state.pool, id, !params.no_body).await?;
    Ok(Json(DataResponse { data: t }))
}

// ---------------------------------------------------------------------------
// POST /templates
// ---------------------------------------------------------------------------

/// Create a template together with its initial attributes.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<impl IntoResponse> {
    template::validate_template_name(&input.name)?;
    template::validate_template_type(&input.template_type)?;
    template::validate_subject(&input.subject)?;
    validate_attributes(&input.attributes)?;
    ensure_project_exists(&state.pool, input.project_id).await?;

    let created = TemplateService::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// PUT /templates/{id}
// ---------------------------------------------------------------------------

/// Update a template and reconcile its attribute set with the submitted list.
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<impl IntoResponse> {
    template::validate_template_name(&input.name)?;
    template::validate_subject(&input.subject)?;
    validate_attributes(&input.attributes)?;
    ensure_template_exists(&state.pool, id).await?;
    ensure_project_exists(&state.pool, input.project_id).await?;

    let updated = TemplateService::update(&state.pool, id, &input).await?;
    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// PUT /templates/{id}/default
// ---------------------------------------------------------------------------

/// Make a template the default one.
pub async fn set_default(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<impl IntoResponse> {
    TemplateService::set_default(&state.pool, id).await?;
    let t = TemplateService::find(&state.pool, id, false).await?;
    Ok(Json(DataResponse { data: t }))
}

// ---------------------------------------------------------------------------
// DELETE /templates/{id}
// ---------------------------------------------------------------------------

/// Delete a template. Refused with 409 for the default template.
pub async fn delete(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    TemplateService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
