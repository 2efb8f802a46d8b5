//! Repository for the `template_attributes` table.
//!
//! Every method accepts any executor, so the same calls work against the
//! pool or inside a transaction opened by the template service.

use courier_core::reconcile::ReconcilePlan;
use courier_core::types::DbId;
use sqlx::{PgExecutor, Postgres, Transaction};

use crate::models::template_attribute::{AttributeInput, TemplateAttribute};

const COLUMNS: &str = "id, key, description, required, default_value, type, template_id";

/// Provides CRUD operations for template attributes.
pub struct TemplateAttributeRepo;

impl TemplateAttributeRepo {
    /// List all attributes across all templates.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<TemplateAttribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM template_attributes ORDER BY id ASC");
        sqlx::query_as::<_, TemplateAttribute>(&query)
            .fetch_all(executor)
            .await
    }

    /// Find a single attribute by ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<TemplateAttribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM template_attributes WHERE id = $1");
        sqlx::query_as::<_, TemplateAttribute>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List the attributes of one template, ordered by id.
    pub async fn list_by_template<'e>(
        executor: impl PgExecutor<'e>,
        template_id: DbId,
    ) -> Result<Vec<TemplateAttribute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM template_attributes WHERE template_id = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, TemplateAttribute>(&query)
            .bind(template_id)
            .fetch_all(executor)
            .await
    }

    /// Insert an attribute bound to `template_id`, returning the new id.
    ///
    /// Any `id` carried by `input` is ignored.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        template_id: DbId,
        input: &AttributeInput,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO template_attributes \
                (key, description, required, default_value, type, template_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
        )
        .bind(&input.key)
        .bind(&input.description)
        .bind(input.required)
        .bind(&input.default_value)
        .bind(&input.attribute_type)
        .bind(template_id)
        .fetch_one(executor)
        .await
    }

    /// Update an attribute in place and rebind it to `template_id`.
    ///
    /// Only `key`, `description` and `default_value` are rewritten; `required`
    /// and `type` keep the values the attribute was created with. A missing
    /// row is not an error; the statement simply matches nothing.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        input: &AttributeInput,
        template_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let result = sqlx::query(
            "UPDATE template_attributes SET \
                key = $2, \
                description = $3, \
                default_value = $4, \
                template_id = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.key)
        .bind(&input.description)
        .bind(&input.default_value)
        .bind(template_id)
        .execute(executor)
        .await?;
        if result.rows_affected() == 0 {
            tracing::debug!(id, template_id, "Attribute update matched no row");
        }
        Ok(())
    }

    /// Delete a single attribute by ID.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM template_attributes WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Execute a reconciliation plan for `template_id` within an existing
    /// transaction.
    ///
    /// Statements run sequentially on the transaction: all deletes, then
    /// all updates, then all creates. The first failure is returned and
    /// the caller is expected to roll back.
    pub async fn apply_plan(
        tx: &mut Transaction<'_, Postgres>,
        template_id: DbId,
        plan: &ReconcilePlan<AttributeInput>,
    ) -> Result<(), sqlx::Error> {
        for row in &plan.to_delete {
            Self::delete(&mut **tx, row.id).await?;
        }

        for update in &plan.to_update {
            Self::update(&mut **tx, update.current.id, &update.desired, template_id).await?;
        }

        for input in &plan.to_create {
            Self::create(&mut **tx, template_id, input).await?;
        }

        Ok(())
    }
}
