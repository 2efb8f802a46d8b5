//! Repository for the `templates` table.
//!
//! Write methods take any executor so the template service can run them on
//! an open transaction alongside the attribute writes.

use courier_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::template::{CreateTemplate, Template, TemplateFilter, UpdateTemplate};

/// Column list for reads. `$2` selects whether the body is returned.
const COLUMNS: &str = "id, name, type, subject, \
     CASE WHEN $2 THEN body ELSE ''::bytea END AS body, \
     is_default, project_id, created_at, updated_at";

/// Provides row-level operations for templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert the scalar fields of a new template, returning its id.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateTemplate,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO templates (name, type, subject, body, project_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.template_type)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(input.project_id)
        .fetch_one(executor)
        .await
    }

    /// Replace the scalar fields of a template. Returns `true` if a row matched.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE templates SET \
                name = $2, \
                subject = $3, \
                body = $4, \
                project_id = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(input.project_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Find a template by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        include_body: bool,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(include_body)
            .fetch_optional(pool)
            .await
    }

    /// List templates, default first, then by id.
    pub async fn list(
        pool: &PgPool,
        filter: &TemplateFilter,
    ) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE ($1::text IS NULL OR type = $1) \
             ORDER BY is_default DESC, id ASC"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&filter.template_type)
            .bind(filter.include_body)
            .fetch_all(pool)
            .await
    }

    /// Check whether a template row exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM templates WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Mark one template as the default and clear the flag on all others.
    ///
    /// Runs as a single statement; the deferred exclusion constraint keeps
    /// at most one default. Nothing changes when `id` does not exist.
    /// Returns `true` if the template was found.
    pub async fn set_default(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let touched: Vec<DbId> = sqlx::query_scalar(
            "UPDATE templates SET is_default = (id = $1) \
             WHERE (id = $1 OR is_default) \
               AND EXISTS (SELECT 1 FROM templates WHERE id = $1) \
             RETURNING id",
        )
        .bind(id)
        .fetch_all(pool)
        .await?;
        Ok(touched.contains(&id))
    }

    /// Delete a template unless it is the default.
    ///
    /// Returns the deleted id, or `None` when nothing was removed (the row
    /// is the default, or does not exist). Attributes cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "DELETE FROM templates WHERE id = $1 AND is_default = false RETURNING id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
