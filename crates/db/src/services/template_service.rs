//! Template writes with attribute reconciliation, and enriched template reads.
//!
//! Create and update open one transaction, run every statement on it in
//! order, and commit once. The `Transaction` guard rolls back when dropped,
//! so every early return (validation failure, storage error) leaves the
//! database untouched.

use courier_core::error::CoreError;
use courier_core::reconcile;
use courier_core::types::DbId;
use sqlx::PgPool;

use crate::models::template::{
    CreateTemplate, Template, TemplateFilter, TemplateWithRelations, UpdateTemplate,
};
use crate::models::template_attribute::AttributeInput;
use crate::repositories::{ProjectRepo, TemplateAttributeRepo, TemplateRepo};
use crate::services::{ServiceError, ServiceResult};

/// Orchestrates template lifecycle operations.
pub struct TemplateService;

impl TemplateService {
    /// Create a template and its initial attributes atomically, then return
    /// the enriched template.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTemplate,
    ) -> ServiceResult<TemplateWithRelations> {
        let mut tx = pool.begin().await?;

        let id = TemplateRepo::create(&mut *tx, input).await?;
        for attribute in &input.attributes {
            TemplateAttributeRepo::create(&mut *tx, id, attribute).await?;
        }

        tx.commit().await?;
        tracing::info!(
            id,
            attributes = input.attributes.len(),
            "Template created"
        );

        Self::find(pool, id, true).await
    }

    /// Replace a template's scalar fields and reconcile its attribute set
    /// against `input.attributes`, atomically.
    ///
    /// Persisted attributes absent from the submission are deleted, entries
    /// without an id are created, and the rest are updated in place. A
    /// submitted id that does not belong to this template fails the whole
    /// update with a validation error.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> ServiceResult<TemplateWithRelations> {
        let mut tx = pool.begin().await?;

        if !TemplateRepo::update(&mut *tx, id, input).await? {
            return Err(CoreError::Internal(format!("template {id} was not updated")).into());
        }

        let current: Vec<AttributeInput> = TemplateAttributeRepo::list_by_template(&mut *tx, id)
            .await?
            .into_iter()
            .map(AttributeInput::from)
            .collect();

        let plan = reconcile::plan(&input.attributes, &current)?;
        let summary = plan.summary();

        TemplateAttributeRepo::apply_plan(&mut tx, id, &plan).await?;

        tx.commit().await?;
        tracing::info!(
            id,
            created = summary.created,
            updated = summary.updated,
            deleted = summary.deleted,
            "Template updated"
        );

        Self::find(pool, id, true).await
    }

    /// Delete a template. The default template cannot be deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if TemplateRepo::delete(pool, id).await?.is_some() {
            tracing::info!(id, "Template deleted");
            return Ok(());
        }

        if TemplateRepo::exists(pool, id).await? {
            Err(CoreError::Conflict("cannot delete the default template".to_string()).into())
        } else {
            Err(CoreError::NotFound {
                entity: "Template",
                id,
            }
            .into())
        }
    }

    /// Mark a template as the default one.
    pub async fn set_default(pool: &PgPool, id: DbId) -> ServiceResult<()> {
        if !TemplateRepo::set_default(pool, id).await? {
            return Err(CoreError::NotFound {
                entity: "Template",
                id,
            }
            .into());
        }
        tracing::info!(id, "Default template set");
        Ok(())
    }

    /// Load one template with its project and attributes.
    pub async fn find(
        pool: &PgPool,
        id: DbId,
        include_body: bool,
    ) -> ServiceResult<TemplateWithRelations> {
        let template = TemplateRepo::find_by_id(pool, id, include_body)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Template",
                id,
            })?;
        Self::enrich(pool, template).await
    }

    /// List templates, each with its project and attributes.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
    ) -> ServiceResult<Vec<TemplateWithRelations>> {
        let templates = TemplateRepo::list(pool, filter).await?;

        let mut out = Vec::with_capacity(templates.len());
        for template in templates {
            out.push(Self::enrich(pool, template).await?);
        }
        Ok(out)
    }

    /// Attach the parent project and attribute collection to a template row.
    ///
    /// Not best-effort: any failure aborts the whole read.
    async fn enrich(pool: &PgPool, template: Template) -> ServiceResult<TemplateWithRelations> {
        let project = ProjectRepo::find_by_id(pool, template.project_id)
            .await
            .map_err(|e| enrichment_error("project", template.id, e))?
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "project {} of template {} is missing",
                    template.project_id, template.id
                ))
            })?;

        let attributes = TemplateAttributeRepo::list_by_template(pool, template.id)
            .await
            .map_err(|e| enrichment_error("attributes", template.id, e))?;

        Ok(TemplateWithRelations {
            template,
            project,
            attributes,
        })
    }
}

fn enrichment_error(what: &str, template_id: DbId, err: sqlx::Error) -> ServiceError {
    tracing::error!(error = %err, template_id, "Failed to load template {what}");
    ServiceError::Core(CoreError::Internal(format!(
        "failed to load {what} of template {template_id}: {err}"
    )))
}
