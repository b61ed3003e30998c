use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{
    CreateTemplateRequest, CvTemplateRow, TemplateFilter, UpdateTemplateRequest,
};

/// Matching templates ordered by display order, then name.
pub async fn list_templates(
    pool: &PgPool,
    filter: &TemplateFilter,
) -> Result<Vec<CvTemplateRow>, AppError> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM cv_templates WHERE TRUE");

    if let Some(active) = filter.active {
        query.push(" AND is_active = ").push_bind(active);
    }
    if let Some(premium) = filter.premium {
        query.push(" AND is_premium = ").push_bind(premium);
    }
    if let Some(template_type) = &filter.template_type {
        query.push(" AND template_type = ").push_bind(template_type.clone());
    }
    if let Some(category) = &filter.category {
        query.push(" AND category = ").push_bind(category.clone());
    }
    query.push(" ORDER BY display_order ASC, name ASC");

    let rows = query.build_query_as::<CvTemplateRow>().fetch_all(pool).await?;
    Ok(rows)
}

pub async fn get_template(pool: &PgPool, id: Uuid) -> Result<CvTemplateRow, AppError> {
    sqlx::query_as::<_, CvTemplateRow>("SELECT * FROM cv_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Fails with `Conflict` when another template already uses `name`.
async fn ensure_name_available(
    pool: &PgPool,
    name: &str,
    exclude: Option<Uuid>,
) -> Result<(), AppError> {
    let owner: Option<Uuid> = sqlx::query_scalar("SELECT id FROM cv_templates WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    match owner {
        Some(id) if Some(id) != exclude => Err(duplicate_name(name)),
        _ => Ok(()),
    }
}

pub async fn create_template(
    pool: &PgPool,
    req: &CreateTemplateRequest,
) -> Result<CvTemplateRow, AppError> {
    let name = req.name.trim();
    ensure_name_available(pool, name, None).await?;

    let row: CvTemplateRow = sqlx::query_as(
        r#"
        INSERT INTO cv_templates
            (name, description, template_type, content, preview_image,
             is_active, is_premium, display_order, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(&req.description)
    .bind(&req.template_type)
    .bind(req.content.clone().unwrap_or_else(|| serde_json::json!({})))
    .bind(&req.preview_image)
    .bind(req.is_active.unwrap_or(true))
    .bind(req.is_premium.unwrap_or(false))
    .bind(req.display_order.unwrap_or(0))
    .bind(&req.category)
    .fetch_one(pool)
    .await
    .map_err(|e| unique_violation_as_conflict(e, name))?;

    info!("Template created: {} ({})", row.name, row.id);
    Ok(row)
}

pub async fn update_template(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateTemplateRequest,
) -> Result<CvTemplateRow, AppError> {
    let name = req.name.as_deref().map(str::trim);
    if let Some(name) = name {
        ensure_name_available(pool, name, Some(id)).await?;
    }

    let row: Option<CvTemplateRow> = sqlx::query_as(
        r#"
        UPDATE cv_templates SET
            name          = COALESCE($2, name),
            description   = COALESCE($3, description),
            template_type = COALESCE($4, template_type),
            content       = COALESCE($5, content),
            preview_image = COALESCE($6, preview_image),
            is_active     = COALESCE($7, is_active),
            is_premium    = COALESCE($8, is_premium),
            display_order = COALESCE($9, display_order),
            category      = COALESCE($10, category),
            updated_at    = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(&req.description)
    .bind(&req.template_type)
    .bind(&req.content)
    .bind(&req.preview_image)
    .bind(req.is_active)
    .bind(req.is_premium)
    .bind(req.display_order)
    .bind(&req.category)
    .fetch_optional(pool)
    .await
    .map_err(|e| unique_violation_as_conflict(e, name.unwrap_or_default()))?;

    let row = row.ok_or_else(|| not_found(id))?;
    info!("Template updated: {}", row.id);
    Ok(row)
}

pub async fn set_active(pool: &PgPool, id: Uuid, is_active: bool) -> Result<CvTemplateRow, AppError> {
    let row: Option<CvTemplateRow> = sqlx::query_as(
        "UPDATE cv_templates SET is_active = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(is_active)
    .fetch_optional(pool)
    .await?;

    let row = row.ok_or_else(|| not_found(id))?;
    info!("Template {} active={}", row.id, row.is_active);
    Ok(row)
}

/// Atomically bumps the usage counter.
pub async fn increment_usage(pool: &PgPool, id: Uuid) -> Result<CvTemplateRow, AppError> {
    let row: Option<CvTemplateRow> = sqlx::query_as(
        "UPDATE cv_templates SET usage_count = usage_count + 1 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| not_found(id))
}

pub async fn delete_template(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM cv_templates WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }
    info!("Template deleted: {id}");
    Ok(())
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Template {id} not found"))
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Conflict(format!("A template named '{name}' already exists"))
}

// Covers the race between the name check and the write.
fn unique_violation_as_conflict(e: sqlx::Error, name: &str) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => duplicate_name(name),
        _ => AppError::Database(e),
    }
}
