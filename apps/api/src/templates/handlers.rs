use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::template::{
    CreateTemplateRequest, CvTemplateRow, TemplateFilter, UpdateTemplateRequest,
};
use crate::state::AppState;
use crate::templates::repository;
use crate::templates::validation::{validate_create, validate_update};

#[derive(Deserialize)]
pub struct ActiveToggle {
    pub is_active: bool,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> Result<Json<Vec<CvTemplateRow>>, AppError> {
    let templates = repository::list_templates(&state.db, &filter).await?;
    Ok(Json(templates))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvTemplateRow>, AppError> {
    Ok(Json(repository::get_template(&state.db, id).await?))
}

/// POST /api/v1/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<CvTemplateRow>), AppError> {
    validate_create(&req)?;
    let template = repository::create_template(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/v1/templates/:id
pub async fn handle_update_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTemplateRequest>,
) -> Result<Json<CvTemplateRow>, AppError> {
    validate_update(&req)?;
    Ok(Json(repository::update_template(&state.db, id, &req).await?))
}

/// PATCH /api/v1/templates/:id/active
pub async fn handle_set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActiveToggle>,
) -> Result<Json<CvTemplateRow>, AppError> {
    Ok(Json(repository::set_active(&state.db, id, req.is_active).await?))
}

/// POST /api/v1/templates/:id/use
pub async fn handle_use_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CvTemplateRow>, AppError> {
    Ok(Json(repository::increment_usage(&state.db, id).await?))
}

/// DELETE /api/v1/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    repository::delete_template(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
