use axum::extract::{Multipart, State};
use axum::Json;

use crate::errors::AppError;
use crate::extraction::upload::{multipart_error, UploadedFile};
use crate::jobs::service::{search_jobs, JobSearchParams, JobSearchResponse};
use crate::state::AppState;

/// POST /api/v1/jobs/search
///
/// Multipart fields: `cv` (file, required), `location`, `include_remote`, `max_results`.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<JobSearchResponse>, AppError> {
    let mut cv = None;
    let mut params = JobSearchParams::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("cv") => cv = Some(UploadedFile::from_field(field).await?),
            Some("location") => {
                let value = field.text().await.map_err(multipart_error)?;
                if !value.trim().is_empty() {
                    params.location = value.trim().to_string();
                }
            }
            Some("include_remote") => {
                let value = field.text().await.map_err(multipart_error)?;
                params.include_remote = parse_bool(&value)?;
            }
            Some("max_results") => {
                let value = field.text().await.map_err(multipart_error)?;
                params.max_results = parse_max_results(&value)?;
            }
            _ => {}
        }
    }

    let cv = cv.ok_or_else(|| AppError::Validation("Missing `cv` field".into()))?;
    let response = search_jobs(&state.vision, &state.llm, &state.search, &cv, &params).await?;
    Ok(Json(response))
}

fn parse_bool(value: &str) -> Result<bool, AppError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(AppError::Validation(format!(
            "include_remote must be a boolean, got {other:?}"
        ))),
    }
}

fn parse_max_results(value: &str) -> Result<u32, AppError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Validation(format!(
            "max_results must be a positive integer, got {value:?}"
        ))),
    }
}
